use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;

use super::WordSource;
use crate::error::{ClackError, Result};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub words: Vec<String>,
}

impl Language {
    pub fn load(name: &str) -> Result<Self> {
        Ok(serde_json::from_str(Self::load_raw(name)?)?)
    }

    /// Contents of a bundled `{name}.json` file.
    pub fn load_raw(name: &str) -> Result<&'static str> {
        let file_name = format!("{name}.json");
        LANG_DIR
            .get_file(&file_name)
            .and_then(|f| f.contents_utf8())
            .ok_or_else(|| ClackError::TargetTextUnavailable(format!("no bundled list {file_name}")))
    }
}

/// Random words drawn from a list compiled into the binary.
#[derive(Debug, Clone)]
pub struct EmbeddedWordSource {
    language: Language,
}

impl EmbeddedWordSource {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn english() -> Result<Self> {
        Language::load("english").map(Self::new)
    }

    pub fn language(&self) -> &Language {
        &self.language
    }
}

impl WordSource for EmbeddedWordSource {
    /// Samples with replacement, so counts above the list size still work.
    fn fetch_words(&self, count: usize) -> Result<Vec<String>> {
        let mut rng = rand::thread_rng();
        let words: Vec<String> = (0..count)
            .filter_map(|_| self.language.words.choose(&mut rng).cloned())
            .collect();

        if words.is_empty() {
            return Err(ClackError::TargetTextUnavailable(format!(
                "word list {} is empty",
                self.language.name
            )));
        }
        Ok(words)
    }
}
