use rand::Rng;
use serde::Deserialize;

use super::embedded::Language;
use crate::error::{ClackError, Result};
use crate::session::TargetText;

#[derive(Deserialize)]
struct QuoteFile {
    quotes: Vec<String>,
}

/// A fixed list of quotes handed out in order, wrapping at the end.
#[derive(Debug, Clone)]
pub struct QuoteRotation {
    quotes: Vec<String>,
    next: usize,
    current: Option<usize>,
}

impl QuoteRotation {
    pub fn new(quotes: Vec<String>) -> Result<Self> {
        let quotes: Vec<String> = quotes
            .into_iter()
            .filter(|q| !q.trim().is_empty())
            .collect();
        if quotes.is_empty() {
            return Err(ClackError::TargetTextUnavailable(
                "no quotes to rotate through".into(),
            ));
        }
        Ok(Self {
            quotes,
            next: 0,
            current: None,
        })
    }

    /// The bundled quotes, starting from a random position.
    pub fn bundled() -> Result<Self> {
        let file = Language::load_raw("quotes")?;
        let parsed: QuoteFile = serde_json::from_str(file)?;
        let mut rotation = Self::new(parsed.quotes)?;
        rotation.next = rand::thread_rng().gen_range(0..rotation.quotes.len());
        Ok(rotation)
    }

    /// The quote most recently handed out, if any.
    pub fn current(&self) -> Option<&str> {
        self.current
            .and_then(|idx| self.quotes.get(idx))
            .map(String::as_str)
    }

    pub fn next_target(&mut self) -> Result<TargetText> {
        let idx = self.next;
        self.next = (idx + 1) % self.quotes.len();
        self.current = Some(idx);
        TargetText::from_quote(&self.quotes[idx])
    }
}
