//! Syntax kind enumeration for the markup CST
//!
//! This module defines all possible node and token types in the markup syntax tree.

use std::fmt;

/// Syntax kind for markup elements
///
/// This enum represents all possible types of nodes and tokens in the markup CST.
/// It includes:
/// - Trivia (whitespace, newlines)
/// - Punctuation inside tags
/// - Content tokens (text, comments, JSX expressions)
/// - Structural nodes (elements, opening/closing tags, attributes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum MarkupSyntaxKind {
    // ==================
    // Trivia (0-9)
    // ==================
    /// Whitespace inside a tag (spaces, tabs)
    Whitespace = 0,
    /// Newline inside a tag
    Newline = 1,

    // ==================
    // Punctuation (10-49)
    // ==================
    /// `<`
    LAngle = 10,
    /// `>`
    RAngle = 11,
    /// `/`
    Slash = 12,
    /// `/>`
    SlashRAngle = 13,
    /// `=`
    Equals = 14,
    /// `.` (member access in JSX tag names)
    Dot = 15,
    /// `:` (XML namespaces)
    Colon = 16,

    // ==================
    // Literals & content (50-99)
    // ==================
    /// Tag or attribute name
    Ident = 50,
    /// Quoted attribute value
    String = 51,
    /// Balanced `{ ... }` JSX expression
    Expression = 52,
    /// Character data between tags
    Text = 53,
    /// `<!-- ... -->` comment
    Comment = 54,

    // ==================
    // Structure nodes (100-199)
    // ==================
    /// Root node
    Document = 100,
    /// An element: opening tag, children and (optional) closing tag
    Element = 101,
    /// `<name attr>`
    OpenTag = 102,
    /// `</name>`, or a zero-width phantom closing
    CloseTag = 103,
    /// `<name attr />`
    SelfClosingTag = 104,
    /// The name part of an opening or closing tag
    TagName = 105,
    /// `name` or `name=value`
    Attribute = 106,

    // ==================
    // Special (400+)
    // ==================
    /// Unexpected character
    Error = 400,
    /// Node wrapping tokens the parser could not place
    ErrorNode = 401,
    /// End of input
    Eof = 402,
}

impl MarkupSyntaxKind {
    /// Check if this is a trivia token
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline)
    }

    /// Check if this kind can appear as part of a tag name
    pub fn is_name_part(self) -> bool {
        matches!(self, Self::Ident | Self::Dot | Self::Colon)
    }
}

impl fmt::Display for MarkupSyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<MarkupSyntaxKind> for rowan::SyntaxKind {
    fn from(kind: MarkupSyntaxKind) -> Self {
        Self(kind as u16)
    }
}
