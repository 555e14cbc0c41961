use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::error::{ClackError, Result};
use crate::session::{Mode, SessionConfig};

pub const WORD_COUNT_PRESETS: [usize; 4] = [10, 20, 50, 100];
pub const DEFAULT_WORD_COUNT: usize = 20;
pub const MIN_CUSTOM_WORDS: usize = 1;
pub const MAX_CUSTOM_WORDS: usize = 1000;
pub const DEFAULT_TICK_MS: u64 = 100;
pub const DEFAULT_API_URL: &str = "https://random-word-api.vercel.app/api";

/// Where target words come from
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Api,
    Embedded,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,
    pub word_count: usize,
    pub custom_word_count: Option<usize>,
    pub tick_ms: u64,
    pub time_limit_secs: Option<u64>,
    pub source: SourceKind,
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Word,
            word_count: DEFAULT_WORD_COUNT,
            custom_word_count: None,
            tick_ms: DEFAULT_TICK_MS,
            time_limit_secs: None,
            source: SourceKind::Api,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// The word count actually requested from the source.
    ///
    /// A custom count wins when it lies in `[1, 1000]`; otherwise the preset
    /// is used, and an unknown preset falls back to the default.
    pub fn effective_word_count(&self) -> usize {
        match self.validate_custom_word_count() {
            Ok(Some(n)) => return n,
            Ok(None) => {}
            Err(err) => warn!(error = %err, preset = self.word_count, "falling back to preset"),
        }

        if WORD_COUNT_PRESETS.contains(&self.word_count) {
            self.word_count
        } else {
            warn!(
                preset = self.word_count,
                default = DEFAULT_WORD_COUNT,
                "unknown word count preset"
            );
            DEFAULT_WORD_COUNT
        }
    }

    pub fn validate_custom_word_count(&self) -> Result<Option<usize>> {
        match self.custom_word_count {
            None => Ok(None),
            Some(n) if (MIN_CUSTOM_WORDS..=MAX_CUSTOM_WORDS).contains(&n) => Ok(Some(n)),
            Some(n) => Err(ClackError::InvalidConfiguration(format!(
                "custom word count {n} outside [{MIN_CUSTOM_WORDS}, {MAX_CUSTOM_WORDS}]"
            ))),
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            mode: self.mode,
            tick: self.tick(),
            time_limit: self
                .time_limit_secs
                .filter(|&s| s > 0)
                .map(Duration::from_secs),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "clackr") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("clackr_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
