//! Line reconciliation: annotate eligible lines of a language-pair note with
//! translations and write the result back only if nobody touched the file in
//! the meantime.

use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, info, trace};

use crate::editor::ActiveEditor;
use crate::eligibility::{annotate_line, is_eligible};
use crate::error::{DictionaryError, Result};
use crate::language_pair::LanguagePair;
use crate::store::FileStore;
use crate::translator::Translator;
use crate::user_config::Settings;
use crate::watcher::FileChangeEvent;

/// What a single reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The file name carries no language pair
    Ignored,
    /// The file could not be found
    Missing,
    /// Nothing to translate
    Unchanged,
    Written { translated: usize },
    /// The file changed while translations were in flight; nothing was written
    Conflict,
}

/// One async lock per path.
#[derive(Debug, Default)]
pub struct PathLocks {
    locks: Mutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, path: &Path) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("PathLocks lock poisoned");
            // Entries only referenced by the map are idle.
            locks.retain(|p, l| p == path || Arc::strong_count(l) > 1);
            Arc::clone(locks.entry(path.to_path_buf()).or_default())
        };
        lock.lock_owned().await
    }

    pub fn len(&self) -> usize {
        self.locks.lock().expect("PathLocks lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Candidate content produced from a baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotated {
    pub content: String,
    pub translated: usize,
}

pub struct Reconciler {
    translator: Arc<dyn Translator>,
    store: Arc<dyn FileStore>,
    editor: Arc<dyn ActiveEditor>,
    locks: PathLocks,
    max_concurrent: usize,
}

impl Reconciler {
    pub fn new(
        settings: &Settings,
        translator: Arc<dyn Translator>,
        store: Arc<dyn FileStore>,
        editor: Arc<dyn ActiveEditor>,
    ) -> Self {
        Self {
            translator,
            store,
            editor,
            locks: PathLocks::new(),
            max_concurrent: settings.max_concurrent_requests.max(1),
        }
    }

    /// Handles one change notification end to end.
    ///
    /// Runs for the same path are serialized; a queued run starts from the
    /// content left by the previous one.
    pub async fn reconcile(&self, event: &FileChangeEvent) -> Result<Outcome> {
        let Some(pair) = LanguagePair::from_file_name(&event.name) else {
            trace!(name = %event.name, "No language pair in file name");
            return Ok(Outcome::Ignored);
        };

        let _guard = self.locks.acquire(&event.path).await;

        let Some(baseline) = self.store.read(&event.path).await? else {
            debug!(path = %event.path.display(), "File vanished before processing");
            return Ok(Outcome::Missing);
        };

        let cursor = self.editor.cursor_line(&event.path);
        let annotated = self.annotate(&baseline, cursor, &pair).await?;

        if annotated.translated == 0 {
            debug!(path = %event.path.display(), "No lines to translate");
            return Ok(Outcome::Unchanged);
        }

        if self
            .store
            .compare_and_swap(&event.path, &baseline, &annotated.content)
            .await?
        {
            info!(
                path = %event.path.display(),
                pair = %pair,
                translated = annotated.translated,
                "Annotated note"
            );
            Ok(Outcome::Written {
                translated: annotated.translated,
            })
        } else {
            debug!(path = %event.path.display(), "Note changed during translation, discarding");
            Ok(Outcome::Conflict)
        }
    }

    /// Builds the candidate for `baseline`. `cursor` is zero-based.
    ///
    /// Any failed line fails the whole candidate.
    pub async fn annotate(
        &self,
        baseline: &str,
        cursor: Option<usize>,
        pair: &LanguagePair,
    ) -> Result<Annotated> {
        let mut lines: Vec<String> = baseline.split('\n').map(str::to_string).collect();

        let eligible: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(i, line)| is_eligible(line, *i, cursor))
            .map(|(i, _)| i)
            .collect();

        if eligible.is_empty() {
            return Ok(Annotated {
                content: baseline.to_string(),
                translated: 0,
            });
        }

        self.translator.check_ready()?;

        let translator = &self.translator;
        let requests = eligible.iter().copied().map(|i| {
            let text = lines[i].trim().to_string();
            async move {
                translator
                    .translate(pair, &text)
                    .await
                    .map(|translation| (i, annotate_line(&text, &translation)))
                    .map_err(|source| DictionaryError::LineTranslation { line: i + 1, source })
            }
        });

        let results: Vec<(usize, String)> = stream::iter(requests)
            .buffered(self.max_concurrent)
            .try_collect()
            .await?;

        for (i, line) in results {
            lines[i] = line;
        }

        Ok(Annotated {
            content: lines.join("\n"),
            translated: eligible.len(),
        })
    }
}
