pub mod embedded;
pub mod http;
pub mod quotes;

pub use embedded::{EmbeddedWordSource, Language};
pub use http::HttpWordSource;
pub use quotes::QuoteRotation;

use tracing::warn;

use crate::config::{Config, SourceKind};
use crate::error::Result;
use crate::session::TargetText;

/// Supplies the words for a new session.
///
/// Implementations must never answer `Ok` with an empty list: a source that
/// has nothing to offer reports `TargetTextUnavailable` instead.
pub trait WordSource {
    fn fetch_words(&self, count: usize) -> Result<Vec<String>>;
}

/// Build the source named by the configuration.
pub fn from_config(config: &Config) -> Result<Box<dyn WordSource>> {
    let source: Box<dyn WordSource> = match config.source {
        SourceKind::Api => Box::new(HttpWordSource::new(config.api_url.clone())?),
        SourceKind::Embedded => Box::new(EmbeddedWordSource::english()?),
    };
    Ok(source)
}

/// Fetch `count` words and turn them into a target, logging failures.
pub fn load_target(source: &dyn WordSource, count: usize) -> Result<TargetText> {
    source
        .fetch_words(count)
        .and_then(TargetText::from_words)
        .inspect_err(|err| warn!(error = %err, count, "could not load target text"))
}
