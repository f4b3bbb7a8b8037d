//! Type aliases for markup CST nodes
//!
//! These types are built on top of Rowan's generic tree types, parameterized
//! with our MarkupLanguage.
//!
//! Red nodes are `!Send`; anything that crosses a thread or task boundary
//! holds the `GreenNode` instead and rebuilds a root with
//! [`MarkupSyntaxNode::new_root`].

use super::MarkupLanguage;

/// A node in the markup concrete syntax tree
///
/// # Example
///
/// ```rust,ignore
/// use tagclose_core::cst::{parse_markup, MarkupSyntaxKind};
///
/// let (root, _, _) = parse_markup("<div>hi</div>");
/// for element in root.children() {
///     assert_eq!(element.kind(), MarkupSyntaxKind::Element);
/// }
/// assert_eq!(root.text().to_string(), "<div>hi</div>");
/// ```
pub type MarkupSyntaxNode = rowan::SyntaxNode<MarkupLanguage>;

/// A token in the markup concrete syntax tree
pub type MarkupSyntaxToken = rowan::SyntaxToken<MarkupLanguage>;

// Re-export common rowan types for convenience
pub use rowan::{GreenNode, NodeOrToken, TextRange, TextSize, WalkEvent};
