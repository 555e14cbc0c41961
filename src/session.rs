use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::error::{ClackError, Result};
use crate::time_series::TimeSeriesPoint;

pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// How typed input is compared against the target
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    #[default]
    Word,
    Character,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Running,
    Finished,
}

/// Text the user is asked to type. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetText {
    words: Vec<String>,
    chars: Vec<char>,
}

impl TargetText {
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .flat_map(|w| {
                w.as_ref()
                    .split_whitespace()
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .collect();

        if words.is_empty() {
            return Err(ClackError::TargetTextUnavailable(
                "word source returned no words".into(),
            ));
        }

        let chars = words.join(" ").chars().collect();
        Ok(Self { words, chars })
    }

    /// A quote or custom prompt. Runs of whitespace collapse to single spaces.
    pub fn from_quote(text: &str) -> Result<Self> {
        Self::from_words(text.split_whitespace())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn as_text(&self) -> String {
        self.chars.iter().collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub mode: Mode,
    pub tick: Duration,
    pub time_limit: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Word,
            tick: DEFAULT_TICK,
            time_limit: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub target: TargetText,
    pub config: SessionConfig,
    pub phase: Phase,
    pub started_at: Option<SystemTime>,
    pub finished_at: Option<SystemTime>,
    pub typed: String,
    pub elapsed_ticks: u64,
    pub wpm_series: Vec<TimeSeriesPoint>,
}

impl Session {
    pub fn new(target: TargetText, config: SessionConfig) -> Self {
        Self {
            target,
            config,
            phase: Phase::Pending,
            started_at: None,
            finished_at: None,
            typed: String::new(),
            elapsed_ticks: 0,
            wpm_series: Vec::new(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.config
            .tick
            .saturating_mul(u32::try_from(self.elapsed_ticks).unwrap_or(u32::MAX))
    }

    pub fn seconds_remaining(&self) -> Option<f64> {
        self.config
            .time_limit
            .map(|limit| limit.saturating_sub(self.elapsed()).as_secs_f64())
    }

    pub fn time_limit_reached(&self) -> bool {
        self.config
            .time_limit
            .is_some_and(|limit| self.elapsed() >= limit)
    }
}
