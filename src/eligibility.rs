/// Marker that separates a line from its translation. Its presence means the
/// line has already been processed.
pub const ANNOTATION_MARKER: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Under the active editor cursor
    Cursor,
    /// Already contains a translation
    Annotated,
    Blank,
    Eligible,
}

impl LineClass {
    pub fn is_eligible(self) -> bool {
        self == Self::Eligible
    }
}

/// Classifies one line. Rules apply in order: cursor, annotated, blank.
pub fn classify(line: &str, index: usize, cursor: Option<usize>) -> LineClass {
    if cursor == Some(index) {
        LineClass::Cursor
    } else if line.contains(ANNOTATION_MARKER) {
        LineClass::Annotated
    } else if line.trim().is_empty() {
        LineClass::Blank
    } else {
        LineClass::Eligible
    }
}

pub fn is_eligible(line: &str, index: usize, cursor: Option<usize>) -> bool {
    classify(line, index, cursor).is_eligible()
}

/// Formats a processed line: `<trimmed original> : <translation>`.
///
/// Line breaks inside the translation are flattened so the file keeps its line count.
pub fn annotate_line(original: &str, translation: &str) -> String {
    let translation = translation.trim().replace(['\r', '\n'], " ");
    format!("{} : {}", original.trim(), translation)
}
