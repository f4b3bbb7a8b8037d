//! Change filtering and closing-tag planning
//!
//! The listener looks at each content change after it has been applied to
//! the document. Only a single inserted `/` directly after a `<` triggers
//! resolution; everything else is ignored without touching the tree.

use rowan::TextSize;

use crate::Result;
use crate::config::TagCloseConfig;
use crate::document::{ContentChange, DocumentId};
use crate::edit::AutoCloseEdit;
use crate::error::TagCloseError;
use crate::planner::plan_edit;
use crate::provider::{TextSource, TreeProvider};
use crate::resolver::resolve_close_tag;
use crate::result::ResultExt;

/// Text that triggers closing-tag completion
pub const TRIGGER: &str = "/";

const LOOKAHEAD_CHARS: usize = 2;

/// Turns trigger keystrokes into closing-tag edits
#[derive(Debug, Clone, Default)]
pub struct ChangeListener {
    config: TagCloseConfig,
}

impl ChangeListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TagCloseConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Whether a change has the trigger shape: exactly `/`, at a known range
    pub fn is_trigger(change: &ContentChange) -> bool {
        change.text == TRIGGER && change.range.is_some()
    }

    /// Plan the closing tag for a change already applied to `source`
    ///
    /// Returns `None` for non-trigger changes, when nothing is open at the
    /// cursor, and when a collaborator fails. Never applies the edit.
    pub fn on_change<S>(
        &self,
        source: &S,
        id: &DocumentId,
        change: &ContentChange,
    ) -> Option<AutoCloseEdit>
    where
        S: TreeProvider + TextSource,
    {
        if !Self::is_trigger(change) {
            tracing::trace!(document = %id, "not a trigger change");
            return None;
        }

        self.try_on_change(source, id, change)
            .log_and_continue()
            .flatten()
    }

    fn try_on_change<S>(
        &self,
        source: &S,
        id: &DocumentId,
        change: &ContentChange,
    ) -> Result<Option<AutoCloseEdit>>
    where
        S: TreeProvider + TextSource,
    {
        let Some(range) = &change.range else {
            return Ok(None);
        };

        let index = source.line_index(id)?;
        let text = index.text();

        // The change is already applied, so its start is where the `/` now sits.
        let slash = usize::from(index.offset(range.start)?);
        if text.get(slash..slash + TRIGGER.len()) != Some(TRIGGER) {
            tracing::trace!(document = %id, slash, "inserted text not found at change start");
            return Ok(None);
        }
        if !text[..slash].ends_with('<') {
            tracing::trace!(document = %id, slash, "slash not preceded by '<'");
            return Ok(None);
        }

        let trigger = slash + TRIGGER.len();
        let offset = TextSize::try_from(trigger)
            .map_err(|_| TagCloseError::invalid_offset(trigger, text.len()))?;

        let Some(tree) = source.tree(id) else {
            tracing::debug!(document = %id, "no tree available");
            return Ok(None);
        };

        let Some(tag) = resolve_close_tag(&tree, offset) else {
            tracing::debug!(document = %id, offset = trigger, "no unclosed tag at cursor");
            return Ok(None);
        };

        if self.config.is_excluded(&tag) {
            tracing::debug!(document = %id, tag = %tag, "tag excluded by configuration");
            return Ok(None);
        }

        let lookahead = lookahead(&text[trigger..]);
        let plan = plan_edit(&tag, lookahead, offset);
        tracing::debug!(
            document = %id,
            tag = %tag,
            insert_offset = u32::from(plan.insert_offset),
            cursor_offset = u32::from(plan.cursor_offset),
            "planned closing tag"
        );

        Ok(Some(AutoCloseEdit {
            document: id.clone(),
            tag,
            plan,
        }))
    }
}

/// Up to the first two characters of `rest`
fn lookahead(rest: &str) -> &str {
    let end = rest
        .char_indices()
        .nth(LOOKAHEAD_CHARS)
        .map(|(idx, _)| idx)
        .unwrap_or(rest.len());
    &rest[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_index::Position;
    use crate::store::DocumentStore;

    /// Open `before`, type `/` at `at`, and return the listener's answer
    fn type_slash(listener: &ChangeListener, before: &str, at: Position) -> Option<AutoCloseEdit> {
        let store = DocumentStore::new();
        let id = DocumentId::from("file:///page.html");
        store.open(id.clone(), before, 1, Some("html".to_string()));

        let change = ContentChange::insert(at, "/");
        store.apply_change(&id, &change, None).expect("change");
        listener.on_change(&store, &id, &change)
    }

    #[test]
    fn test_lookahead_is_at_most_two_chars() {
        assert_eq!(lookahead("/>rest"), "/>");
        assert_eq!(lookahead(">"), ">");
        assert_eq!(lookahead(""), "");
        assert_eq!(lookahead("éèx"), "éè");
    }

    #[test]
    fn test_trigger_shape() {
        assert!(ChangeListener::is_trigger(&ContentChange::insert(
            Position::new(0, 0),
            "/"
        )));
        assert!(!ChangeListener::is_trigger(&ContentChange::insert(
            Position::new(0, 0),
            "x"
        )));
        assert!(!ChangeListener::is_trigger(&ContentChange::insert(
            Position::new(0, 0),
            "</"
        )));
        assert!(!ChangeListener::is_trigger(&ContentChange::full("/")));
    }

    #[test]
    fn test_plans_closing_tag() {
        let edit = type_slash(&ChangeListener::new(), "<div><", Position::new(0, 6))
            .expect("edit");
        assert_eq!(edit.tag, "div");
        assert_eq!(edit.plan.insert_text, "div>");
        assert_eq!(edit.plan.insert_offset, TextSize::from(7));
        assert_eq!(edit.plan.cursor_offset, TextSize::from(11));
    }

    #[test]
    fn test_slash_after_other_char_is_ignored() {
        assert!(type_slash(&ChangeListener::new(), "<div> ", Position::new(0, 6)).is_none());
        assert!(type_slash(&ChangeListener::new(), "<div>", Position::new(0, 5)).is_none());
    }

    #[test]
    fn test_excluded_tag() {
        let config = TagCloseConfig {
            excluded_tags: vec!["div".to_string()],
            ..TagCloseConfig::default()
        };
        let listener = ChangeListener::from_config(&config);
        assert!(type_slash(&listener, "<div><", Position::new(0, 6)).is_none());
    }

    #[test]
    fn test_unknown_document_is_silent() {
        let store = DocumentStore::new();
        let id = DocumentId::from("file:///missing.html");
        let change = ContentChange::insert(Position::new(0, 1), "/");
        assert!(ChangeListener::new().on_change(&store, &id, &change).is_none());
    }

    #[test]
    fn test_multiline_trigger() {
        let edit = type_slash(
            &ChangeListener::new(),
            "<ul>\n  <li>item\n  <",
            Position::new(2, 3),
        )
        .expect("edit");
        assert_eq!(edit.tag, "li");
    }
}
