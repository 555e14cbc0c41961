use std::time::Duration;

/// Characters per word for gross speed.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Below this accuracy the results screen nudges towards precision.
pub const ACCURACY_FEEDBACK_THRESHOLD: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    pub correct_units: usize,
    pub total_errors: usize,
    pub wpm: u32,
    pub accuracy: u32,
}

impl Metrics {
    pub fn feedback(&self) -> &'static str {
        if self.accuracy < ACCURACY_FEEDBACK_THRESHOLD {
            "Focus on improving your accuracy."
        } else {
            "Great job! Keep practicing to improve your speed further."
        }
    }
}

fn minutes(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() / 60.0
}

fn round(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

/// Net speed: committed correct words per minute.
pub fn net_wpm(correct_words: usize, elapsed: Duration) -> u32 {
    let mins = minutes(elapsed);
    if mins <= 0.0 {
        return 0;
    }
    round(correct_words as f64 / mins)
}

/// Gross speed: every typed character counts, five to a word.
pub fn gross_wpm(chars_typed: usize, elapsed: Duration) -> u32 {
    let mins = minutes(elapsed);
    if mins <= 0.0 {
        return 0;
    }
    round((chars_typed as f64 / CHARS_PER_WORD) / mins)
}

pub fn word_accuracy(correct_words: usize, committed_words: usize) -> u32 {
    round(correct_words as f64 / committed_words.max(1) as f64 * 100.0)
}

pub fn char_accuracy(chars_typed: usize, errors: usize) -> u32 {
    if chars_typed == 0 {
        return 100;
    }
    round(chars_typed.saturating_sub(errors) as f64 / chars_typed as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_wpm() {
        assert_eq!(net_wpm(30, Duration::from_secs(60)), 30);
        assert_eq!(net_wpm(10, Duration::from_secs(30)), 20);
        assert_eq!(net_wpm(1, Duration::from_millis(700)), 86);
    }

    #[test]
    fn test_gross_wpm() {
        assert_eq!(gross_wpm(300, Duration::from_secs(60)), 60);
        assert_eq!(gross_wpm(150, Duration::from_secs(30)), 60);
    }

    #[test]
    fn zero_elapsed_is_zero_wpm() {
        assert_eq!(net_wpm(12, Duration::ZERO), 0);
        assert_eq!(gross_wpm(100, Duration::ZERO), 0);
    }

    #[test]
    fn test_word_accuracy() {
        assert_eq!(word_accuracy(0, 0), 0);
        assert_eq!(word_accuracy(1, 2), 50);
        assert_eq!(word_accuracy(2, 3), 67);
        assert_eq!(word_accuracy(5, 5), 100);
    }

    #[test]
    fn test_char_accuracy() {
        assert_eq!(char_accuracy(0, 0), 100);
        assert_eq!(char_accuracy(3, 1), 67);
        assert_eq!(char_accuracy(4, 4), 0);
        assert_eq!(char_accuracy(10, 0), 100);
    }

    #[test]
    fn test_feedback() {
        let mut m = Metrics {
            accuracy: 79,
            ..Metrics::default()
        };
        assert_eq!(m.feedback(), "Focus on improving your accuracy.");
        m.accuracy = 80;
        assert!(m.feedback().starts_with("Great job!"));
    }
}
