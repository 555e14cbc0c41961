//! Classification of typed input against target text.
//!
//! Both functions are pure: the same target and buffer always produce the
//! same statuses and counts, so callers never need to store them.

use itertools::{EitherOrBoth, Itertools};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitStatus {
    Pending,
    Current,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordProgress {
    pub statuses: Vec<UnitStatus>,
    pub correct: usize,
    pub incorrect: usize,
    /// Words the user has moved past, including any typed beyond the target.
    pub committed: usize,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharProgress {
    pub statuses: Vec<UnitStatus>,
    pub correct: usize,
    pub errors: usize,
    pub typed: usize,
    pub complete: bool,
}

pub fn classify_words(target: &[String], typed: &str) -> WordProgress {
    let input: Vec<&str> = typed.split_whitespace().collect();
    let trailing_space = !input.is_empty() && typed.ends_with(char::is_whitespace);
    let last = target.len().saturating_sub(1);

    let is_committed = |i: usize| {
        i + 1 < input.len()
            || trailing_space
            || (i == last && input.get(i).is_some_and(|w| *w == target[i].as_str()))
    };

    let mut correct = 0;
    let mut incorrect = 0;
    let statuses = target
        .iter()
        .enumerate()
        .map(|(i, expected)| match input.get(i) {
            None => UnitStatus::Pending,
            Some(_) if !is_committed(i) => UnitStatus::Current,
            Some(word) if *word == expected.as_str() => {
                correct += 1;
                UnitStatus::Correct
            }
            Some(_) => {
                incorrect += 1;
                UnitStatus::Incorrect
            }
        })
        .collect();

    // tokens past the end of the target are committed misses once moved past
    let overflow = (target.len()..input.len())
        .filter(|&i| i + 1 < input.len() || trailing_space)
        .count();

    let complete = !target.is_empty()
        && input.len() == target.len()
        && input.last().copied() == target.last().map(String::as_str);

    WordProgress {
        statuses,
        correct,
        incorrect: incorrect + overflow,
        committed: correct + incorrect + overflow,
        complete,
    }
}

pub fn classify_chars(target: &[char], typed: &str) -> CharProgress {
    let mut statuses = vec![UnitStatus::Pending; target.len()];
    let mut correct = 0;
    let mut errors = 0;
    let mut count = 0;

    for (i, pair) in typed.chars().zip_longest(target.iter()).enumerate() {
        match pair {
            EitherOrBoth::Both(got, &want) => {
                count += 1;
                if got == want {
                    correct += 1;
                    statuses[i] = UnitStatus::Correct;
                } else {
                    errors += 1;
                    statuses[i] = UnitStatus::Incorrect;
                }
            }
            EitherOrBoth::Left(_) => {
                count += 1;
                errors += 1;
            }
            EitherOrBoth::Right(_) => break,
        }
    }

    CharProgress {
        statuses,
        correct,
        errors,
        typed: count,
        complete: !target.is_empty() && count >= target.len(),
    }
}
