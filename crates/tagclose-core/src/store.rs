//! Open documents and their parse trees
//!
//! The store is the tree index the resolver queries. Every document carries
//! a version that increases with each applied change; its tree is stamped
//! with the version it was parsed from and re-parsed lazily when the two
//! disagree, so a tree handed out always matches the current text.

use std::ops::Range;
use std::sync::Arc;

use dashmap::DashMap;
use rowan::{GreenNode, TextRange};

use crate::Result;
use crate::cst::{MarkupSyntaxNode, parse_markup_green};
use crate::document::{ContentChange, DocumentId};
use crate::error::TagCloseError;
use crate::line_index::LineIndex;
use crate::provider::{TextSource, TreeProvider};

#[derive(Debug, Clone)]
struct ParsedTree {
    green: GreenNode,
    version: i32,
}

#[derive(Debug, Clone)]
struct DocumentState {
    line_index: LineIndex,
    version: i32,
    language_id: Option<String>,
    tree: Option<ParsedTree>,
}

impl DocumentState {
    fn new(text: &str, version: i32, language_id: Option<String>) -> Self {
        Self {
            line_index: LineIndex::new(text),
            version,
            language_id,
            tree: None,
        }
    }

    fn replace_text(&mut self, text: String, version: Option<i32>) {
        self.line_index = LineIndex::new(text);
        self.version = version.unwrap_or(self.version + 1);
    }

    fn current_tree(&mut self) -> GreenNode {
        match &self.tree {
            Some(tree) if tree.version == self.version => tree.green.clone(),
            _ => {
                let (green, lexer_errors, parse_errors) =
                    parse_markup_green(self.line_index.text());
                tracing::trace!(
                    version = self.version,
                    lexer_errors = lexer_errors.len(),
                    parse_errors = parse_errors.len(),
                    "parsed document"
                );
                self.tree = Some(ParsedTree {
                    green: green.clone(),
                    version: self.version,
                });
                green
            }
        }
    }
}

/// Concurrent map of open documents keyed by identity
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<DocumentId, DocumentState>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or reopen) a document with its full text
    pub fn open(
        &self,
        id: DocumentId,
        text: &str,
        version: i32,
        language_id: Option<String>,
    ) {
        tracing::debug!(document = %id, version, "opened document");
        self.documents
            .insert(id, DocumentState::new(text, version, language_id));
    }

    /// Forget a document; returns whether it was open
    pub fn close(&self, id: &DocumentId) -> bool {
        self.documents.remove(id).is_some()
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.documents.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Apply one editor change. `version` is the editor's version after the
    /// change, when it reports one; otherwise the stored version is bumped.
    pub fn apply_change(
        &self,
        id: &DocumentId,
        change: &ContentChange,
        version: Option<i32>,
    ) -> Result<()> {
        let mut state = self
            .documents
            .get_mut(id)
            .ok_or_else(|| TagCloseError::unknown_document(id))?;

        let new_text = match &change.range {
            None => change.text.clone(),
            Some(range) => {
                let start = usize::from(state.line_index.offset(range.start)?);
                let end = usize::from(state.line_index.offset(range.end)?);
                splice(state.line_index.text(), start.min(end)..end.max(start), &change.text)
            }
        };

        state.replace_text(new_text, version);
        Ok(())
    }

    /// Replace a byte range of the document, as an editor would when applying
    /// an edit
    pub fn apply_edit(&self, id: &DocumentId, range: TextRange, new_text: &str) -> Result<()> {
        let mut state = self
            .documents
            .get_mut(id)
            .ok_or_else(|| TagCloseError::unknown_document(id))?;

        let text = state.line_index.text();
        let bytes: Range<usize> = range.into();
        if bytes.end > text.len()
            || !text.is_char_boundary(bytes.start)
            || !text.is_char_boundary(bytes.end)
        {
            return Err(TagCloseError::invalid_offset(bytes.end, text.len()));
        }

        let new_text = splice(text, bytes, new_text);
        state.replace_text(new_text, None);
        Ok(())
    }

    /// Current text of a document
    pub fn text(&self, id: &DocumentId) -> Result<Arc<str>> {
        self.documents
            .get(id)
            .map(|state| Arc::from(state.line_index.text()))
            .ok_or_else(|| TagCloseError::unknown_document(id))
    }

    pub fn version(&self, id: &DocumentId) -> Result<i32> {
        self.documents
            .get(id)
            .map(|state| state.version)
            .ok_or_else(|| TagCloseError::unknown_document(id))
    }

    pub fn language_id(&self, id: &DocumentId) -> Option<String> {
        self.documents
            .get(id)
            .and_then(|state| state.language_id.clone())
    }
}

impl TreeProvider for DocumentStore {
    fn tree(&self, id: &DocumentId) -> Option<MarkupSyntaxNode> {
        let green = self.documents.get_mut(id)?.current_tree();
        Some(MarkupSyntaxNode::new_root(green))
    }
}

impl TextSource for DocumentStore {
    fn line_index(&self, id: &DocumentId) -> Result<LineIndex> {
        self.documents
            .get(id)
            .map(|state| state.line_index.clone())
            .ok_or_else(|| TagCloseError::unknown_document(id))
    }
}

fn splice(text: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() - range.len() + replacement.len());
    out.push_str(&text[..range.start]);
    out.push_str(replacement);
    out.push_str(&text[range.end..]);
    out
}
