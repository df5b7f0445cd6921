use std::path::PathBuf;
use thiserror::Error;

use crate::translator::TranslationError;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("translation of line {line} failed: {source}")]
    LineTranslation {
        line: usize,
        #[source]
        source: TranslationError,
    },

    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DictionaryError {
    /// The translator failure behind this error, if any.
    pub fn translation(&self) -> Option<&TranslationError> {
        match self {
            Self::LineTranslation { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DictionaryError>;
