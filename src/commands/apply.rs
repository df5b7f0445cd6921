use dialoguer::console::style;
use dictionary::editor::{ActiveCursor, ActiveEditor, NoActiveEditor};
use dictionary::watcher::FileChangeEvent;
use dictionary::{Outcome, Settings};
use std::path::Path;
use std::sync::Arc;

use super::{build_reconciler, zero_based};

pub(crate) async fn cmd_apply(file: &Path, cursor_line: Option<u64>) -> anyhow::Result<()> {
    let Some(event) = FileChangeEvent::from_path(file) else {
        anyhow::bail!("{} is not a file path", file.display());
    };

    let settings = Settings::load()?;
    let editor: Arc<dyn ActiveEditor> = match cursor_line {
        Some(line) => Arc::new(ActiveCursor::new(file, zero_based(line))),
        None => Arc::new(NoActiveEditor),
    };
    let reconciler = build_reconciler(&settings, editor)?;

    tracing::trace!(path = %file.display(), cursor_line = ?cursor_line, "cmd_apply invoked");

    match reconciler.reconcile(&event).await? {
        Outcome::Ignored => println!(
            "{} {} does not end in .<from>-<to>.md; nothing to do",
            style("!").yellow(),
            event.name
        ),
        Outcome::Missing => anyhow::bail!("{} not found", file.display()),
        Outcome::Unchanged => println!(
            "{} {} is already annotated",
            style("✓").green(),
            event.name
        ),
        Outcome::Written { translated } => println!(
            "{} Annotated {} line(s) in {}",
            style("✓").green(),
            translated,
            event.name
        ),
        Outcome::Conflict => println!(
            "{} {} changed while translating; left untouched",
            style("!").yellow(),
            event.name
        ),
    }

    Ok(())
}
