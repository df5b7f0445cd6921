pub mod clienv;
pub mod editor;
pub mod eligibility;
pub mod error;
pub mod language_pair;
pub mod reconciler;
pub mod service;
pub mod store;
pub mod translator;
pub mod user_config;
pub mod watcher;

pub use error::{DictionaryError, Result};
pub use language_pair::LanguagePair;
pub use reconciler::{Outcome, Reconciler};
pub use user_config::Settings;
