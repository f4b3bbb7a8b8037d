//! Edit planning for a resolved closing tag

use rowan::{TextRange, TextSize};

/// Terminator the user may already have typed right after the cursor
pub const SELF_CLOSING_TERMINATOR: &str = "/>";

/// What to insert, where, and where the cursor goes afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPlan {
    pub insert_text: String,
    pub insert_offset: TextSize,
    pub cursor_offset: TextSize,
}

impl EditPlan {
    /// Empty range at the insertion point
    pub fn insert_range(&self) -> TextRange {
        TextRange::empty(self.insert_offset)
    }

    /// Collapsed selection at the target cursor position
    pub fn cursor_range(&self) -> TextRange {
        TextRange::empty(self.cursor_offset)
    }
}

/// Plan the insertion for `tag_name` at `offset`, right after the typed `/`
///
/// `lookahead` holds the (up to) two characters following `offset`. When it
/// is exactly `/>`, the tag is completed by the existing terminator: only the
/// bare name is inserted and the cursor skips past the `/>` as well.
/// Otherwise `name>` is inserted and the cursor lands right after it.
pub fn plan_edit(tag_name: &str, lookahead: &str, offset: TextSize) -> EditPlan {
    let reuse_terminator = lookahead == SELF_CLOSING_TERMINATOR;

    let insert_text = if reuse_terminator {
        tag_name.to_string()
    } else {
        format!("{tag_name}>")
    };

    let mut cursor_offset = offset + TextSize::of(insert_text.as_str());
    if reuse_terminator {
        cursor_offset += TextSize::of(SELF_CLOSING_TERMINATOR);
    }

    EditPlan {
        insert_text,
        insert_offset: offset,
        cursor_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_closing_bracket() {
        let plan = plan_edit("div", "", TextSize::from(7));
        assert_eq!(plan.insert_text, "div>");
        assert_eq!(plan.insert_offset, TextSize::from(7));
        assert_eq!(plan.cursor_offset, TextSize::from(11));
    }

    #[test]
    fn test_reuses_existing_self_closing_terminator() {
        let plan = plan_edit("div", "/>", TextSize::from(7));
        assert_eq!(plan.insert_text, "div");
        assert_eq!(plan.insert_offset, TextSize::from(7));
        assert_eq!(plan.cursor_offset, TextSize::from(12));
    }

    #[test]
    fn test_lone_bracket_is_not_a_terminator() {
        let plan = plan_edit("span", ">\n", TextSize::from(0));
        assert_eq!(plan.insert_text, "span>");
        assert_eq!(plan.cursor_offset, TextSize::from(5));
    }

    #[test]
    fn test_member_access_name() {
        let plan = plan_edit("foo.Bar", "\n<", TextSize::from(3));
        assert_eq!(plan.insert_text, "foo.Bar>");
        assert_eq!(plan.cursor_range(), TextRange::empty(TextSize::from(11)));
        assert_eq!(plan.insert_range(), TextRange::empty(TextSize::from(3)));
    }
}
