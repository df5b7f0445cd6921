pub(crate) mod apply;
pub(crate) mod config;
pub(crate) mod translate;
pub(crate) mod watch;

use dictionary::editor::ActiveEditor;
use dictionary::store::DiskStore;
use dictionary::translator::GoogleTranslator;
use dictionary::{Reconciler, Settings};
use std::sync::Arc;

/// Reconciler over the local disk and the Google translator.
pub(crate) fn build_reconciler(
    settings: &Settings,
    editor: Arc<dyn ActiveEditor>,
) -> anyhow::Result<Reconciler> {
    let translator = GoogleTranslator::new(settings)?;
    Ok(Reconciler::new(
        settings,
        Arc::new(translator),
        Arc::new(DiskStore),
        editor,
    ))
}

/// Converts a 1-based CLI line number to the zero-based index used internally.
pub(crate) fn zero_based(line: u64) -> usize {
    usize::try_from(line.saturating_sub(1)).unwrap_or(usize::MAX)
}
