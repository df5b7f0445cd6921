use std::path::PathBuf;

#[derive(Debug, Clone, Copy)]
pub enum EnvVar {
    DictConfigDir,
    DictApiKey,
    DictLog,
    RustLog,
}

impl EnvVar {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DictConfigDir => "DICT_CONFIG_DIR",
            Self::DictApiKey => "DICT_API_KEY",
            Self::DictLog => "DICT_LOG",
            Self::RustLog => "RUST_LOG",
        }
    }
}

const FALLBACK_CONFIG_DIR: &str = "~/.config";
const DICT_SUBDIR: &str = "dictionary";
const DEFAULT_LOG_FILTER: &str = "info";

/// Non-empty value of an environment variable.
fn env_opt(var: EnvVar) -> Option<String> {
    std::env::var(var.as_str())
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Config directory ($DICT_CONFIG_DIR or ~/.config/dictionary)
pub fn config_dir() -> PathBuf {
    let dir = env_opt(EnvVar::DictConfigDir)
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from(FALLBACK_CONFIG_DIR))
                .join(DICT_SUBDIR)
        });
    tracing::trace!(dir = %dir.display(), "Resolved config directory");
    dir
}

/// API key override ($DICT_API_KEY)
pub fn api_key() -> Option<String> {
    let val = env_opt(EnvVar::DictApiKey);
    tracing::trace!(present = val.is_some(), "DICT_API_KEY env var");
    val
}

/// Log filter ($DICT_LOG, then $RUST_LOG, then "info")
pub fn log_filter() -> String {
    env_opt(EnvVar::DictLog)
        .or_else(|| env_opt(EnvVar::RustLog))
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}
