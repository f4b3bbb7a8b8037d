//! Conversions between LSP protocol types and tagclose types

use tagclose_core::line_index::{LineIndex, Position};
use tagclose_core::{AutoCloseEdit, ContentChange, DocumentId, Result};
use tower_lsp::lsp_types::{self, TextDocumentContentChangeEvent, Url};

pub fn document_id(uri: &Url) -> DocumentId {
    DocumentId::from(uri.as_str())
}

pub fn to_core_position(position: lsp_types::Position) -> Position {
    Position::new(position.line, position.character)
}

pub fn to_lsp_position(position: Position) -> lsp_types::Position {
    lsp_types::Position::new(position.line, position.character)
}

pub fn to_core_change(event: &TextDocumentContentChangeEvent) -> ContentChange {
    match event.range {
        Some(range) => ContentChange::replace(
            to_core_position(range.start)..to_core_position(range.end),
            event.text.clone(),
        ),
        None => ContentChange::full(event.text.clone()),
    }
}

/// A closing-tag edit expressed in protocol coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct LspAutoClose {
    pub uri: Url,
    /// Insertion, in coordinates of the text before the edit
    pub edit: lsp_types::TextEdit,
    /// Collapsed selection, in coordinates of the text after the edit
    pub selection: lsp_types::Range,
}

/// Translate `edit` using the index of the text it was planned against
///
/// The selection is computed against the text as it will read once the
/// insertion lands, since that is the text the editor holds when the cursor
/// is moved.
pub fn to_lsp_auto_close(uri: Url, edit: &AutoCloseEdit, index: &LineIndex) -> Result<LspAutoClose> {
    let insert_at = to_lsp_position(index.position(edit.plan.insert_offset)?);

    let text = index.text();
    let split = usize::from(edit.plan.insert_offset);
    let after = LineIndex::new(format!(
        "{}{}{}",
        &text[..split],
        edit.plan.insert_text,
        &text[split..]
    ));
    let cursor = to_lsp_position(after.position(edit.plan.cursor_offset)?);

    Ok(LspAutoClose {
        uri,
        edit: lsp_types::TextEdit::new(
            lsp_types::Range::new(insert_at, insert_at),
            edit.plan.insert_text.clone(),
        ),
        selection: lsp_types::Range::new(cursor, cursor),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagclose_core::cst::TextSize;
    use tagclose_core::plan_edit;

    fn uri() -> Url {
        Url::parse("file:///src/App.tsx").expect("uri")
    }

    #[test]
    fn test_change_conversion() {
        let incremental = TextDocumentContentChangeEvent {
            range: Some(lsp_types::Range::new(
                lsp_types::Position::new(1, 2),
                lsp_types::Position::new(1, 2),
            )),
            range_length: None,
            text: "/".to_string(),
        };
        assert_eq!(
            to_core_change(&incremental),
            ContentChange::insert(Position::new(1, 2), "/")
        );

        let full = TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "<p>".to_string(),
        };
        assert_eq!(to_core_change(&full), ContentChange::full("<p>"));
    }

    #[test]
    fn test_auto_close_positions_span_lines() {
        let index = LineIndex::new("<ul>\n  <li></");
        let edit = AutoCloseEdit {
            document: document_id(&uri()),
            tag: "li".to_string(),
            plan: plan_edit("li", "", TextSize::from(13)),
        };

        let lsp = to_lsp_auto_close(uri(), &edit, &index).expect("convert");
        assert_eq!(lsp.edit.range.start, lsp_types::Position::new(1, 8));
        assert_eq!(lsp.edit.new_text, "li>");
        assert_eq!(lsp.selection.start, lsp_types::Position::new(1, 11));
        assert_eq!(lsp.selection.start, lsp.selection.end);
    }

    #[test]
    fn test_selection_skips_existing_terminator() {
        let index = LineIndex::new("<div><//>");
        let edit = AutoCloseEdit {
            document: document_id(&uri()),
            tag: "div".to_string(),
            plan: plan_edit("div", "/>", TextSize::from(7)),
        };

        let lsp = to_lsp_auto_close(uri(), &edit, &index).expect("convert");
        assert_eq!(lsp.edit.new_text, "div");
        assert_eq!(lsp.selection.start, lsp_types::Position::new(0, 12));
    }
}
