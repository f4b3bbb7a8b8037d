//! Document identity and change events

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::line_index::Position;

/// Stable identity of a document: an LSP URI or a file path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(Arc<str>);

impl DocumentId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File extension of the last path segment, lowercased (`tsx`, `html`)
    pub fn extension(&self) -> Option<String> {
        let path = self.0.split(['?', '#']).next().unwrap_or_default();
        let file_name = path.rsplit(['/', '\\']).next()?;
        let (stem, ext) = file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// A single content change reported by the editor
///
/// `range` is the replaced range in the document as it was before the change;
/// `None` means the whole document was replaced by `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
    pub range: Option<Range<Position>>,
    pub text: String,
}

impl ContentChange {
    /// Insertion of `text` at `position`
    pub fn insert(position: Position, text: impl Into<String>) -> Self {
        Self {
            range: Some(position..position),
            text: text.into(),
        }
    }

    /// Replacement of `range` by `text`
    pub fn replace(range: Range<Position>, text: impl Into<String>) -> Self {
        Self {
            range: Some(range),
            text: text.into(),
        }
    }

    /// Whole-document replacement
    pub fn full(text: impl Into<String>) -> Self {
        Self {
            range: None,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_uri_and_path() {
        assert_eq!(
            DocumentId::from("file:///src/App.TSX").extension(),
            Some("tsx".to_string())
        );
        assert_eq!(
            DocumentId::from("C:\\site\\index.html").extension(),
            Some("html".to_string())
        );
        assert_eq!(
            DocumentId::from("untitled:Untitled-1").extension(),
            None
        );
        assert_eq!(DocumentId::from("/home/me/.bashrc").extension(), None);
    }
}
