use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use super::WordSource;
use crate::error::{ClackError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Random words from an HTTP endpoint answering `GET {base}?words=N` with a
/// JSON array of strings.
#[derive(Debug, Clone)]
pub struct HttpWordSource {
    client: Client,
    base_url: String,
}

impl HttpWordSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Decode a response body. Anything other than a non-empty array of strings
/// is treated as unavailable.
pub fn parse_word_list(body: &str) -> Result<Vec<String>> {
    let words: Vec<String> = serde_json::from_str(body)?;
    let words: Vec<String> = words
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return Err(ClackError::TargetTextUnavailable(
            "word service returned an empty list".into(),
        ));
    }
    Ok(words)
}

impl WordSource for HttpWordSource {
    fn fetch_words(&self, count: usize) -> Result<Vec<String>> {
        debug!(url = %self.base_url, count, "fetching words");
        let res = self
            .client
            .get(&self.base_url)
            .query(&[("words", count)])
            .send()?;

        if !res.status().is_success() {
            warn!(status = %res.status(), "word service request failed");
            return Err(ClackError::TargetTextUnavailable(format!(
                "word service answered {}",
                res.status()
            )));
        }

        parse_word_list(&res.text()?)
    }
}
