use thiserror::Error;

/// Errors surfaced at the boundary between the evaluator and its collaborators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClackError {
    /// The word source failed or returned nothing usable; no session can start.
    #[error("target text unavailable: {0}")]
    TargetTextUnavailable(String),

    /// A configuration value was out of range. Callers fall back to defaults.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type Result<T> = std::result::Result<T, ClackError>;

impl From<reqwest::Error> for ClackError {
    fn from(err: reqwest::Error) -> Self {
        ClackError::TargetTextUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for ClackError {
    fn from(err: serde_json::Error) -> Self {
        ClackError::TargetTextUnavailable(format!("malformed word list: {err}"))
    }
}
