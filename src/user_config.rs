use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DictionaryError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com/language/translate/v2";

/// Persisted plugin settings. Missing keys fall back to [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Google Cloud Translation API key
    pub api_key: String,
    /// Default source language for ad-hoc translations
    pub from_language: String,
    /// Translation v2 endpoint
    pub endpoint: String,
    pub request_timeout_secs: u64,
    /// Upper bound on in-flight translation calls per file
    pub max_concurrent_requests: usize,
    /// Quiet period before a changed file is processed
    pub debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            from_language: "en".to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: 30,
            max_concurrent_requests: 8,
            debounce_ms: 500,
        }
    }
}

impl Settings {
    /// $DICT_CONFIG_DIR/config.toml or ~/.config/dictionary/config.toml
    pub fn config_path() -> PathBuf {
        crate::clienv::config_dir().join("config.toml")
    }

    /// Loads the stored settings and applies environment overrides.
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from(&Self::config_path())?;
        if let Some(key) = crate::clienv::api_key() {
            settings.api_key = key;
        }
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::trace!(path = %path.display(), "Loading settings");

        if !path.exists() {
            tracing::trace!("Settings file does not exist, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&content).map_err(|source| {
            DictionaryError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        tracing::trace!(
            from_language = %settings.from_language,
            endpoint = %settings.endpoint,
            has_api_key = !settings.api_key.is_empty(),
            "Settings loaded"
        );
        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        tracing::trace!(path = %path.display(), "Saving settings");

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        tracing::trace!("Settings saved");
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn is_interactive() -> bool {
        std::io::IsTerminal::is_terminal(&std::io::stdin())
    }
}
