//! Closing-tag resolution
//!
//! Given a parsed document and an offset, find the innermost opening tag that
//! is still unclosed at that offset. The open-tag stack is rebuilt from the
//! tree on every call; nothing is retained between calls.

use rowan::WalkEvent;

use crate::cst::ast::{AstNode, CloseTag, OpenTag};
use crate::cst::{MarkupSyntaxKind, MarkupSyntaxNode, TextSize};

/// Name of the tag a `</` typed at `offset` should close, if any
///
/// The tree is walked in document order. Opening tags that start at or
/// before `offset` are pushed; closing tags that start at or before `offset`
/// pop one entry (a pop on an empty stack does nothing). A zero-width closing
/// tag that starts exactly at `offset` is the parser's completion of the very
/// `</` being typed and is ignored. Subtrees starting after `offset` are not
/// visited.
///
/// Returns the innermost unclosed tag's name verbatim (`foo.Bar`,
/// `svg:rect`), or `None` when every tag is closed or the innermost open tag
/// is a fragment.
pub fn resolve_close_tag(root: &MarkupSyntaxNode, offset: TextSize) -> Option<String> {
    let mut open: Vec<OpenTag> = Vec::new();
    let mut preorder = root.preorder();

    while let Some(event) = preorder.next() {
        let WalkEvent::Enter(node) = event else {
            continue;
        };

        if node.text_range().start() > offset {
            preorder.skip_subtree();
            continue;
        }

        match node.kind() {
            MarkupSyntaxKind::OpenTag => open.extend(OpenTag::cast(node)),
            MarkupSyntaxKind::CloseTag => {
                let Some(close) = CloseTag::cast(node) else {
                    continue;
                };
                if close.start() == offset && close.is_phantom() {
                    tracing::trace!(offset = u32::from(offset), "ignoring phantom closing tag");
                    continue;
                }
                open.pop();
            }
            _ => {}
        }
    }

    let innermost = open.pop()?;
    let name = innermost.name();
    if name.is_empty() {
        tracing::debug!("innermost open tag is a fragment; nothing to close");
        return None;
    }

    tracing::debug!(tag = %name, offset = u32::from(offset), "resolved closing tag");
    Some(name)
}
