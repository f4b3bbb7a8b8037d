//! Applying a planned closing tag to a live document
//!
//! Application has two phases. The text is inserted first; moving the
//! cursor is queued as a follow-up that the host runs once its own
//! processing of the insertion has settled. Placing the cursor inside the
//! first phase would race the host's post-edit bookkeeping.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use rowan::{TextRange, TextSize};

use crate::Result;
use crate::document::DocumentId;
use crate::error::TagCloseError;
use crate::planner::EditPlan;
use crate::store::DocumentStore;

/// Represents a text edit operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Range to replace
    pub range: TextRange,
    /// New text to insert
    pub new_text: String,
}

impl TextEdit {
    /// Create an insertion edit
    pub fn insert(position: TextSize, text: impl Into<String>) -> Self {
        Self {
            range: TextRange::empty(position),
            new_text: text.into(),
        }
    }

    /// Check if this edit is an insertion
    pub fn is_insertion(&self) -> bool {
        self.range.is_empty() && !self.new_text.is_empty()
    }
}

/// Host operations needed to apply an edit and place the cursor
pub trait EditApplier {
    /// Replace `range` in the document with `new_text`
    fn replace_range(&mut self, id: &DocumentId, range: TextRange, new_text: &str) -> Result<()>;

    /// Move the selection of the document to `range`
    fn set_selection(&mut self, id: &DocumentId, range: TextRange) -> Result<()>;
}

type FollowUp<'a, A> = Box<dyn FnOnce(&mut A) -> Result<()> + 'a>;

/// Actions to run after the current edit application settles
pub struct FollowUps<'a, A> {
    queue: VecDeque<FollowUp<'a, A>>,
}

impl<A> Default for FollowUps<'_, A> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<A> fmt::Debug for FollowUps<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FollowUps")
            .field("pending", &self.queue.len())
            .finish()
    }
}

impl<'a, A> FollowUps<'a, A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: impl FnOnce(&mut A) -> Result<()> + 'a) {
        self.queue.push_back(Box::new(action));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Run every queued action in order
    ///
    /// Actions queued while running are run too. The first failure stops the
    /// drain and is returned; later actions stay queued.
    pub fn run_pending(&mut self, applier: &mut A) -> Result<()> {
        while let Some(action) = self.queue.pop_front() {
            action(applier)?;
        }
        Ok(())
    }
}

/// A closing tag ready to be applied to one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoCloseEdit {
    pub document: DocumentId,
    pub tag: String,
    pub plan: EditPlan,
}

impl AutoCloseEdit {
    /// The insertion as a plain text edit
    pub fn text_edit(&self) -> TextEdit {
        TextEdit::insert(self.plan.insert_offset, self.plan.insert_text.clone())
    }

    /// Insert the closing tag now and queue the cursor move
    pub fn apply<'a, A: EditApplier + 'a>(
        self,
        applier: &mut A,
        follow_ups: &mut FollowUps<'a, A>,
    ) -> Result<()> {
        let edit = self.text_edit();
        applier.replace_range(&self.document, edit.range, &edit.new_text)?;

        let document = self.document;
        let cursor = self.plan.cursor_range();
        follow_ups.push(move |applier: &mut A| applier.set_selection(&document, cursor));
        Ok(())
    }
}

/// Applies edits directly to a [`DocumentStore`] and records selections
///
/// Useful for hosts that keep their buffers in the store itself, and for
/// exercising the whole pipeline without an editor.
#[derive(Debug)]
pub struct StoreApplier<'a> {
    store: &'a DocumentStore,
    selections: HashMap<DocumentId, TextRange>,
}

impl<'a> StoreApplier<'a> {
    pub fn new(store: &'a DocumentStore) -> Self {
        Self {
            store,
            selections: HashMap::new(),
        }
    }

    pub fn selection(&self, id: &DocumentId) -> Option<TextRange> {
        self.selections.get(id).copied()
    }
}

impl EditApplier for StoreApplier<'_> {
    fn replace_range(&mut self, id: &DocumentId, range: TextRange, new_text: &str) -> Result<()> {
        self.store.apply_edit(id, range, new_text)
    }

    fn set_selection(&mut self, id: &DocumentId, range: TextRange) -> Result<()> {
        let len = self.store.text(id)?.len();
        if usize::from(range.end()) > len {
            return Err(TagCloseError::invalid_offset(usize::from(range.end()), len));
        }
        self.selections.insert(id.clone(), range);
        Ok(())
    }
}
