use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::Result;

/// Read and conditional-write access to note contents.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Current content, or `None` when the file no longer exists.
    async fn read(&self, path: &Path) -> Result<Option<String>>;

    /// Replaces the content only if it still equals `expected`.
    ///
    /// Returns `false` when the file changed (or vanished) since it was read.
    async fn compare_and_swap(&self, path: &Path, expected: &str, replacement: &str)
        -> Result<bool>;
}

/// Notes on the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl DiskStore {
    fn staging_path(path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        path.with_file_name(format!(".{name}.dict-tmp"))
    }
}

#[async_trait]
impl FileStore for DiskStore {
    async fn read(&self, path: &Path) -> Result<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn compare_and_swap(
        &self,
        path: &Path,
        expected: &str,
        replacement: &str,
    ) -> Result<bool> {
        let Some(current) = self.read(path).await? else {
            return Ok(false);
        };
        if current != expected {
            return Ok(false);
        }

        // Symlinked notes are updated at their target, keeping the link.
        let target = match tokio::fs::canonicalize(path).await {
            Ok(target) => target,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        let permissions = tokio::fs::metadata(&target).await?.permissions();

        // Readers never observe a half-written note.
        let staging = Self::staging_path(&target);
        tokio::fs::write(&staging, replacement).await?;
        let staged = match tokio::fs::set_permissions(&staging, permissions).await {
            Ok(()) => tokio::fs::rename(&staging, &target).await,
            Err(e) => Err(e),
        };
        if let Err(e) = staged {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e.into());
        }
        Ok(true)
    }
}

/// In-memory notes keyed by path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RwLock<HashMap<PathBuf, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let mut files = self.files.write().expect("MemoryStore lock poisoned");
        files.insert(path.into(), content.into());
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        let files = self.files.read().expect("MemoryStore lock poisoned");
        files.get(path).cloned()
    }

    pub fn remove(&self, path: &Path) {
        let mut files = self.files.write().expect("MemoryStore lock poisoned");
        files.remove(path);
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn read(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.get(path))
    }

    async fn compare_and_swap(
        &self,
        path: &Path,
        expected: &str,
        replacement: &str,
    ) -> Result<bool> {
        let mut files = self.files.write().expect("MemoryStore lock poisoned");
        match files.get_mut(path) {
            Some(current) if current == expected => {
                *current = replacement.to_string();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
