use std::time::Duration;

use clackr::{Evaluator, Mode, Phase, SessionConfig, TargetText, UnitStatus};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn started(words: &[&str], mode: Mode, tick: Duration) -> Evaluator {
    let mut evaluator = Evaluator::new();
    evaluator.start(
        TargetText::from_words(words.iter().copied()).unwrap(),
        SessionConfig {
            mode,
            tick,
            time_limit: None,
        },
    );
    evaluator
}

fn tick_n(evaluator: &mut Evaluator, n: usize) {
    for _ in 0..n {
        evaluator.on_clock_tick();
    }
}

#[test]
fn exact_sentence_finishes_with_full_accuracy() {
    let words = ["the", "quick", "brown", "fox"];
    for mode in [Mode::Word, Mode::Character] {
        let mut ev = started(&words, mode, Duration::from_millis(100));
        ev.on_input("t");
        tick_n(&mut ev, 10);
        ev.on_input("the quick brown fox");

        assert_eq!(ev.phase(), Some(Phase::Finished), "{mode}");
        let m = ev.metrics();
        assert_eq!(m.accuracy, 100, "{mode}");
        assert_eq!(m.total_errors, 0, "{mode}");
        assert!(ev
            .unit_statuses()
            .iter()
            .all(|s| *s == UnitStatus::Correct));
    }
}

#[test]
fn character_mode_single_substitution() {
    let mut ev = started(&["cat"], Mode::Character, Duration::from_millis(100));
    ev.on_input("c");
    tick_n(&mut ev, 600);
    ev.on_input("cbt");

    assert_eq!(
        ev.unit_statuses(),
        vec![UnitStatus::Correct, UnitStatus::Incorrect, UnitStatus::Correct]
    );
    let m = ev.metrics();
    assert_eq!(m.total_errors, 1);
    assert_eq!(m.accuracy, 67);
    // three characters in one minute is less than a word
    assert_eq!(m.wpm, 1);
    assert!(ev.is_finished());
}

#[test]
fn word_mode_typo_in_committed_word() {
    let mut ev = started(
        &["the", "quick", "fox"],
        Mode::Word,
        Duration::from_millis(100),
    );
    ev.on_input("the quikc ");

    assert_eq!(
        ev.unit_statuses(),
        vec![UnitStatus::Correct, UnitStatus::Incorrect, UnitStatus::Pending]
    );
    let m = ev.metrics();
    assert_eq!(m.correct_units, 1);
    assert_eq!(m.total_errors, 1);
    assert_eq!(m.accuracy, 50);
    assert!(!ev.is_finished());
}

#[test]
fn zero_elapsed_time_reports_zero_wpm() {
    let mut ev = started(&["a", "b"], Mode::Word, Duration::from_millis(100));
    ev.on_input("a b");
    assert!(ev.is_finished());
    assert_eq!(ev.elapsed(), Duration::ZERO);
    assert_eq!(ev.metrics().wpm, 0);
}

#[test]
fn backspace_returns_units_to_pending() {
    let mut ev = started(&["ab"], Mode::Character, Duration::from_millis(100));
    ev.on_input("ax");
    assert_eq!(
        ev.unit_statuses(),
        vec![UnitStatus::Correct, UnitStatus::Incorrect]
    );
    ev.on_input("a");
    assert_eq!(
        ev.unit_statuses(),
        vec![UnitStatus::Correct, UnitStatus::Pending]
    );
    assert_eq!(ev.metrics().total_errors, 0);
}

#[test]
fn repeated_input_is_idempotent() {
    let mut ev = started(&["hello", "world"], Mode::Character, Duration::from_millis(100));
    let first = ev.on_input("helo w");
    let statuses = ev.unit_statuses();
    let second = ev.on_input("helo w");
    assert_eq!(first, second);
    assert_eq!(statuses, ev.unit_statuses());
}

#[test]
fn finished_session_ignores_input_and_ticks() {
    let mut ev = started(&["go"], Mode::Character, Duration::from_millis(100));
    ev.on_input("g");
    tick_n(&mut ev, 3);
    ev.on_input("go");
    let frozen = ev.metrics();

    assert!(ev.on_input("gox").is_none());
    assert!(ev.on_clock_tick().is_none());
    assert_eq!(ev.metrics(), frozen);
    assert_eq!(ev.elapsed(), Duration::from_millis(300));
}

#[test]
fn random_input_keeps_metrics_in_bounds() {
    let pool = ["alpha", "beta", "gamma", "delta", "omega"];
    let alphabet: Vec<char> = "abegilmopt ".chars().collect();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..200 {
        let mode = if round % 2 == 0 {
            Mode::Word
        } else {
            Mode::Character
        };
        let words: Vec<&str> = (0..rng.gen_range(1..6))
            .map(|_| pool[rng.gen_range(0..pool.len())])
            .collect();
        let mut ev = started(&words, mode, Duration::from_millis(250));

        let mut buffer = String::new();
        for _ in 0..rng.gen_range(0..40) {
            if rng.gen_bool(0.15) {
                buffer.pop();
            } else {
                buffer.push(alphabet[rng.gen_range(0..alphabet.len())]);
            }
            ev.on_input(&buffer);
            if rng.gen_bool(0.3) {
                ev.on_clock_tick();
            }

            let statuses = ev.unit_statuses();
            let m = ev.metrics();
            let units = match mode {
                Mode::Word => words.len(),
                Mode::Character => ev.target().unwrap().chars().len(),
            };
            assert_eq!(statuses.len(), units);
            assert!(m.correct_units <= units);
            assert!(m.accuracy <= 100);
            assert!(
                statuses
                    .iter()
                    .filter(|s| **s == UnitStatus::Current)
                    .count()
                    <= 1
            );
            if ev.is_finished() {
                break;
            }
        }
    }
}
