//! Concrete Syntax Tree (CST) for JSX/HTML/XML-like markup
//!
//! This module implements a lossless syntax tree using the Rowan library.
//! The CST preserves all source text, so offsets reported by nodes are
//! offsets into the document the editor holds.
//!
//! ## Architecture
//!
//! - **Green Tree**: immutable, position-independent and `Send + Sync`.
//!   This is what caches and shared state keep.
//! - **Red Tree**: a view with parent pointers and absolute offsets, created
//!   on demand with `MarkupSyntaxNode::new_root(green)` for traversal.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tagclose_core::cst::{parse_markup, MarkupSyntaxKind};
//!
//! let (root, _lexer_errors, _parse_errors) = parse_markup("<div><span>");
//! let opens = root
//!     .descendants()
//!     .filter(|n| n.kind() == MarkupSyntaxKind::OpenTag)
//!     .count();
//! assert_eq!(opens, 2);
//! ```

mod builder;
mod language;
mod lexer;
mod nodes;
mod parser;
mod syntax_kind;

pub mod ast;

pub use builder::CstBuilder;
pub use language::MarkupLanguage;
pub use lexer::{CstLexResult, CstSpan, CstToken, LexerError, lex_with_trivia};
pub use nodes::*;
pub use parser::{ParseError, ParseErrorKind, parse_markup, parse_markup_green};
pub use syntax_kind::MarkupSyntaxKind;

#[cfg(test)]
mod tests;
