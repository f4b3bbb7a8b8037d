//! Typed AST layer over the markup CST
//!
//! Ergonomic, type-safe wrappers over the raw CST nodes. Each wrapper
//! implements `cast()` to safely convert from a CST node.
//!
//! # Example
//!
//! ```ignore
//! use tagclose_core::cst::{parse_markup, ast::{AstNode, Document}};
//!
//! let (root, _, _) = parse_markup("<foo.Bar x={1}>");
//! let document = Document::cast(root).unwrap();
//! let element = document.elements().next().unwrap();
//!
//! assert_eq!(element.open_tag().unwrap().name(), "foo.Bar");
//! assert!(element.close_tag().is_none());
//! ```

use super::{MarkupSyntaxKind, MarkupSyntaxNode, TextSize};

/// Helper trait for casting CST nodes to typed wrappers
pub trait AstNode: Sized {
    fn can_cast(kind: MarkupSyntaxKind) -> bool;
    fn cast(node: MarkupSyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &MarkupSyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            syntax: MarkupSyntaxNode,
        }

        impl AstNode for $name {
            fn can_cast(kind: MarkupSyntaxKind) -> bool {
                kind == MarkupSyntaxKind::$kind
            }

            fn cast(node: MarkupSyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self { syntax: node })
                } else {
                    None
                }
            }

            fn syntax(&self) -> &MarkupSyntaxNode {
                &self.syntax
            }
        }
    };
}

/// Helper function to find the tag name child of a tag node
fn tag_name_of(parent: &MarkupSyntaxNode) -> Option<TagName> {
    parent.children().find_map(TagName::cast)
}

ast_node!(
    /// Root of a parsed markup document
    Document,
    Document
);

impl Document {
    /// Top-level elements
    pub fn elements(&self) -> impl Iterator<Item = Element> {
        self.syntax.children().filter_map(Element::cast)
    }
}

ast_node!(
    /// An element with its opening tag, children and optional closing tag
    Element,
    Element
);

impl Element {
    pub fn open_tag(&self) -> Option<OpenTag> {
        self.syntax.children().find_map(OpenTag::cast)
    }

    /// The closing tag, phantom or real, if the parser found one
    pub fn close_tag(&self) -> Option<CloseTag> {
        self.syntax.children().find_map(CloseTag::cast)
    }

    /// Child elements, skipping text and self-closing tags
    pub fn child_elements(&self) -> impl Iterator<Item = Element> {
        self.syntax.children().filter_map(Element::cast)
    }
}

ast_node!(
    /// `<name ...>`
    OpenTag,
    OpenTag
);

impl OpenTag {
    /// Tag name verbatim, including member access or namespace syntax.
    /// Empty for fragments (`<>`).
    ///
    /// This is the `TagName` node's text, not everything between `<` and
    /// `>`, so `<div class="a">` yields `div` rather than `div class="a"`.
    pub fn name(&self) -> String {
        tag_name_of(&self.syntax)
            .map(|name| name.text())
            .unwrap_or_default()
    }

    pub fn start(&self) -> TextSize {
        self.syntax.text_range().start()
    }

    pub fn is_fragment(&self) -> bool {
        tag_name_of(&self.syntax).is_none()
    }
}

ast_node!(
    /// `</name>`, or a zero-width closing completed by the parser after a dangling `</`
    CloseTag,
    CloseTag
);

impl CloseTag {
    pub fn name(&self) -> Option<String> {
        tag_name_of(&self.syntax).map(|name| name.text())
    }

    pub fn start(&self) -> TextSize {
        self.syntax.text_range().start()
    }

    /// Zero-width closing synthesized by the parser
    pub fn is_phantom(&self) -> bool {
        self.syntax.text_range().is_empty()
    }
}

ast_node!(
    /// `<name ... />`
    SelfClosingTag,
    SelfClosingTag
);

impl SelfClosingTag {
    pub fn name(&self) -> String {
        tag_name_of(&self.syntax)
            .map(|name| name.text())
            .unwrap_or_default()
    }
}

ast_node!(
    /// Name part of a tag
    TagName,
    TagName
);

impl TagName {
    pub fn text(&self) -> String {
        self.syntax.text().to_string()
    }
}
