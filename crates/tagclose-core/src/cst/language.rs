//! Rowan language implementation for markup
//!
//! This module implements the `rowan::Language` trait, which connects
//! our MarkupSyntaxKind enum to Rowan's generic CST infrastructure.

use rowan::Language;

use super::MarkupSyntaxKind;

/// Language implementation for JSX/HTML/XML-like markup
///
/// This is a zero-sized type that implements `rowan::Language` to provide
/// the connection between our syntax kinds and Rowan's generic tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkupLanguage;

impl Language for MarkupLanguage {
    type Kind = MarkupSyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        match raw.0 {
            // Trivia
            0 => MarkupSyntaxKind::Whitespace,
            1 => MarkupSyntaxKind::Newline,

            // Punctuation (10-49)
            10 => MarkupSyntaxKind::LAngle,
            11 => MarkupSyntaxKind::RAngle,
            12 => MarkupSyntaxKind::Slash,
            13 => MarkupSyntaxKind::SlashRAngle,
            14 => MarkupSyntaxKind::Equals,
            15 => MarkupSyntaxKind::Dot,
            16 => MarkupSyntaxKind::Colon,

            // Literals & content (50-99)
            50 => MarkupSyntaxKind::Ident,
            51 => MarkupSyntaxKind::String,
            52 => MarkupSyntaxKind::Expression,
            53 => MarkupSyntaxKind::Text,
            54 => MarkupSyntaxKind::Comment,

            // Structure nodes (100-199)
            100 => MarkupSyntaxKind::Document,
            101 => MarkupSyntaxKind::Element,
            102 => MarkupSyntaxKind::OpenTag,
            103 => MarkupSyntaxKind::CloseTag,
            104 => MarkupSyntaxKind::SelfClosingTag,
            105 => MarkupSyntaxKind::TagName,
            106 => MarkupSyntaxKind::Attribute,

            // Special (400+)
            400 => MarkupSyntaxKind::Error,
            401 => MarkupSyntaxKind::ErrorNode,
            402 => MarkupSyntaxKind::Eof,

            unknown => {
                tracing::warn!("Unknown syntax kind: {unknown}");
                MarkupSyntaxKind::Error
            }
        }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}
