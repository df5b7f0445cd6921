use std::path::{Path, PathBuf};

/// Source of the active editor's cursor position.
pub trait ActiveEditor: Send + Sync {
    /// Zero-based cursor line, only when `path` is the file being edited.
    fn cursor_line(&self, path: &Path) -> Option<usize>;
}

/// No file is open for editing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActiveEditor;

impl ActiveEditor for NoActiveEditor {
    fn cursor_line(&self, _path: &Path) -> Option<usize> {
        None
    }
}

/// A single file with a fixed cursor line.
#[derive(Debug, Clone)]
pub struct ActiveCursor {
    path: PathBuf,
    line: usize,
}

impl ActiveCursor {
    /// `line` is zero-based.
    pub fn new(path: impl Into<PathBuf>, line: usize) -> Self {
        let path = path.into();
        // Watch events carry canonical paths; match them when possible.
        let path = std::fs::canonicalize(&path).unwrap_or(path);
        Self { path, line }
    }
}

impl ActiveEditor for ActiveCursor {
    fn cursor_line(&self, path: &Path) -> Option<usize> {
        if path == self.path {
            return Some(self.line);
        }
        match std::fs::canonicalize(path) {
            Ok(canonical) if canonical == self.path => Some(self.line),
            _ => None,
        }
    }
}
