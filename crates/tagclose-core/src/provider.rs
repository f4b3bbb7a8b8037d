//! Seams between closing-tag completion and the host editor
//!
//! Resolution only needs a tree and some text. Both are supplied through
//! these traits so the core can run against the bundled [`DocumentStore`]
//! or against a host's own parse cache.
//!
//! [`DocumentStore`]: crate::store::DocumentStore

use std::ops::Range;

use rowan::TextRange;

use crate::Result;
use crate::cst::MarkupSyntaxNode;
use crate::document::DocumentId;
use crate::error::TagCloseError;
use crate::line_index::LineIndex;

/// Supplies the parsed tree of a document
///
/// Implementations must return a tree that reflects every change the
/// provider has been told about, including the one that triggered the
/// current query. `None` means no tree is available; callers treat that as
/// "nothing to close".
pub trait TreeProvider {
    fn tree(&self, id: &DocumentId) -> Option<MarkupSyntaxNode>;
}

/// Supplies document text and position mapping
pub trait TextSource {
    /// Line index over the current text of the document
    fn line_index(&self, id: &DocumentId) -> Result<LineIndex>;

    /// Text in the byte range `range`
    fn text_range(&self, id: &DocumentId, range: TextRange) -> Result<String> {
        let index = self.line_index(id)?;
        let bytes: Range<usize> = range.into();
        index
            .text()
            .get(bytes)
            .map(str::to_owned)
            .ok_or_else(|| {
                TagCloseError::invalid_offset(usize::from(range.end()), index.text().len())
            })
    }
}
