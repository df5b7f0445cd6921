use notify::event::{EventKind, ModifyKind};
use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

use crate::error::Result;

/// A note changed on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChangeEvent {
    pub path: PathBuf,
    /// Final path component, used for language-pair matching
    pub name: String,
}

impl FileChangeEvent {
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_str()?.to_string();
        Some(Self { path, name })
    }
}

fn is_content_change(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

/// Live subscription to file changes under a directory.
///
/// Dropping it stops the underlying OS watcher.
pub struct VaultWatcher {
    watcher: RecommendedWatcher,
    events: mpsc::UnboundedReceiver<FileChangeEvent>,
}

impl VaultWatcher {
    /// Splits into the OS watcher handle, which must stay alive, and the event channel.
    pub fn into_parts(self) -> (RecommendedWatcher, mpsc::UnboundedReceiver<FileChangeEvent>) {
        (self.watcher, self.events)
    }
}

/// Watches `root` recursively and forwards content changes as events.
pub fn subscribe(root: &Path) -> Result<VaultWatcher> {
    let (tx, events) = mpsc::unbounded_channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: std::result::Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if !is_content_change(&event.kind) {
                    return;
                }
                for path in event.paths {
                    if let Some(change) = FileChangeEvent::from_path(path) {
                        tracing::trace!(path = %change.path.display(), kind = ?event.kind, "File changed");
                        // Receiver gone means the service is shutting down.
                        let _ = tx.send(change);
                    }
                }
            }
            Err(e) => tracing::warn!("File watcher error: {}", e),
        },
        Config::default(),
    )?;

    watcher.watch(root, RecursiveMode::Recursive)?;
    tracing::info!(root = %root.display(), "Watching for note changes");

    Ok(VaultWatcher { watcher, events })
}
