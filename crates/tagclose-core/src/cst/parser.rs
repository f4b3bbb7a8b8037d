//! Hierarchical parser for markup
//!
//! Builds a lossless CST from the token stream. Elements nest: each
//! `Element` holds its `OpenTag`, its children and, when present, the
//! `CloseTag` that ended it. A closing tag always ends the innermost open
//! element, whatever its name; this is a recovery-oriented parser, not a
//! validator.
//!
//! A dangling `</` that is not followed by a name or `>` is kept inside an
//! `ErrorNode`, and the parser then completes the element with a zero-width
//! `CloseTag` placed right after the `/`. Consumers that look backward from
//! a cursor must treat that phantom as an artifact of the cursor position.

use std::ops::Range;

use rowan::GreenNode;

use super::lexer::LexerError;
use super::{CstBuilder, CstToken, MarkupSyntaxKind, MarkupSyntaxNode};

/// A structural error found while building the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Range<usize>,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A tag reached a new `<` or end of input without `>`
    UnterminatedTag,
    /// An element was still open at end of input
    UnclosedElement,
    /// `</` with no name after it
    DanglingCloseTag,
    /// A closing tag with no element to close
    StrayCloseTag,
    /// A token that cannot appear where it was found
    UnexpectedToken,
}

impl ParseError {
    fn new(message: impl Into<String>, span: Range<usize>, kind: ParseErrorKind) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
        }
    }
}

/// Parse markup source into a CST
///
/// # Example
///
/// ```rust,ignore
/// use tagclose_core::cst::parse_markup;
///
/// let (root, lexer_errors, parse_errors) = parse_markup("<div><br/></div>");
/// assert!(lexer_errors.is_empty() && parse_errors.is_empty());
/// assert_eq!(root.text().to_string(), "<div><br/></div>");
/// ```
pub fn parse_markup(source: &str) -> (MarkupSyntaxNode, Vec<LexerError>, Vec<ParseError>) {
    let (green, lexer_errors, parse_errors) = parse_markup_green(source);
    (MarkupSyntaxNode::new_root(green), lexer_errors, parse_errors)
}

/// Parse markup source into a thread-safe green tree
pub fn parse_markup_green(source: &str) -> (GreenNode, Vec<LexerError>, Vec<ParseError>) {
    let (tokens, lexer_errors) = super::lex_with_trivia(source);
    let mut parser = Parser::new(&tokens);
    parser.parse_document();
    let (green, parse_errors) = parser.finish();
    (green, lexer_errors, parse_errors)
}

/// What kind of tag starts at the current `<`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagShape {
    Open,
    SelfClosing,
    Close,
    DanglingClose,
}

/// Token stream parser
struct Parser<'a> {
    tokens: &'a [CstToken],
    pos: usize,
    builder: CstBuilder,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [CstToken]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: CstBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> (GreenNode, Vec<ParseError>) {
        (self.builder.finish(), self.errors)
    }

    /// Parse the top-level document
    fn parse_document(&mut self) {
        self.builder.start_node(MarkupSyntaxKind::Document);

        while !self.at_end() {
            if self.at(MarkupSyntaxKind::LAngle) {
                match self.tag_shape() {
                    TagShape::Close => {
                        let start = self.current_span().start;
                        self.parse_close_tag();
                        self.error(
                            "Closing tag without a matching opening tag",
                            start..self.previous_end(),
                            ParseErrorKind::StrayCloseTag,
                        );
                    }
                    TagShape::DanglingClose => self.parse_dangling_close(),
                    TagShape::Open | TagShape::SelfClosing => self.parse_element(),
                }
            } else {
                self.parse_content_token();
            }
        }

        self.builder.finish_node(); // DOCUMENT
    }

    /// Parse an element or a self-closing tag starting at `<`
    fn parse_element(&mut self) {
        if self.tag_shape() == TagShape::SelfClosing {
            self.builder.start_node(MarkupSyntaxKind::SelfClosingTag);
            self.parse_tag_body();
            self.builder.finish_node(); // SELF_CLOSING_TAG
            return;
        }

        let start = self.current_span().start;
        self.builder.start_node(MarkupSyntaxKind::Element);

        self.builder.start_node(MarkupSyntaxKind::OpenTag);
        self.parse_tag_body();
        self.builder.finish_node(); // OPEN_TAG

        loop {
            if self.at_end() {
                self.error(
                    "Element is never closed",
                    start..self.previous_end(),
                    ParseErrorKind::UnclosedElement,
                );
                break;
            }

            if self.at(MarkupSyntaxKind::LAngle) {
                match self.tag_shape() {
                    TagShape::Close => {
                        self.parse_close_tag();
                        break;
                    }
                    TagShape::DanglingClose => {
                        self.parse_dangling_close();
                        break;
                    }
                    TagShape::Open | TagShape::SelfClosing => self.parse_element(),
                }
            } else {
                self.parse_content_token();
            }
        }

        self.builder.finish_node(); // ELEMENT
    }

    /// Parse `<` name attributes... up to and including `>` or `/>`
    fn parse_tag_body(&mut self) {
        let start = self.current_span().start;
        self.expect(MarkupSyntaxKind::LAngle);
        self.consume_trivia();

        if self.at(MarkupSyntaxKind::Ident) {
            self.parse_tag_name();
        }

        loop {
            self.consume_trivia();
            match self.current_kind() {
                MarkupSyntaxKind::RAngle | MarkupSyntaxKind::SlashRAngle => {
                    self.add_current_token();
                    self.advance();
                    return;
                }
                MarkupSyntaxKind::Ident | MarkupSyntaxKind::Expression => self.parse_attribute(),
                MarkupSyntaxKind::LAngle | MarkupSyntaxKind::Eof => {
                    self.error(
                        "Tag is missing its closing '>'",
                        start..self.previous_end(),
                        ParseErrorKind::UnterminatedTag,
                    );
                    return;
                }
                _ => self.unexpected_token(),
            }
        }
    }

    /// Tag name: `div`, `foo.Bar`, `svg:rect`
    fn parse_tag_name(&mut self) {
        self.builder.start_node(MarkupSyntaxKind::TagName);
        self.add_current_token();
        self.advance();
        while self.current_kind().is_name_part() {
            self.add_current_token();
            self.advance();
        }
        self.builder.finish_node(); // TAG_NAME
    }

    /// Attribute: `name`, `name=value`, `ns:name="v"` or a `{...spread}` expression
    fn parse_attribute(&mut self) {
        self.builder.start_node(MarkupSyntaxKind::Attribute);

        if self.at(MarkupSyntaxKind::Expression) {
            self.add_current_token();
            self.advance();
            self.builder.finish_node(); // ATTRIBUTE
            return;
        }

        self.add_current_token();
        self.advance();
        while self.current_kind().is_name_part() {
            self.add_current_token();
            self.advance();
        }

        if self.peek_non_trivia() == MarkupSyntaxKind::Equals {
            self.consume_trivia();
            self.add_current_token(); // =
            self.advance();
            self.consume_trivia();
            match self.current_kind() {
                MarkupSyntaxKind::String
                | MarkupSyntaxKind::Expression
                | MarkupSyntaxKind::Ident => {
                    self.add_current_token();
                    self.advance();
                }
                _ => {
                    let at = self.current_span().start;
                    self.error(
                        "Attribute is missing a value",
                        at..at,
                        ParseErrorKind::UnexpectedToken,
                    );
                }
            }
        }

        self.builder.finish_node(); // ATTRIBUTE
    }

    /// Parse `</name>` (or the fragment closer `</>`)
    fn parse_close_tag(&mut self) {
        let start = self.current_span().start;
        self.builder.start_node(MarkupSyntaxKind::CloseTag);
        self.expect(MarkupSyntaxKind::LAngle);
        self.expect(MarkupSyntaxKind::Slash);
        self.consume_trivia();

        if self.at(MarkupSyntaxKind::Ident) {
            self.parse_tag_name();
        }

        loop {
            self.consume_trivia();
            match self.current_kind() {
                MarkupSyntaxKind::RAngle => {
                    self.add_current_token();
                    self.advance();
                    break;
                }
                MarkupSyntaxKind::LAngle | MarkupSyntaxKind::Eof => {
                    self.error(
                        "Closing tag is missing its '>'",
                        start..self.previous_end(),
                        ParseErrorKind::UnterminatedTag,
                    );
                    break;
                }
                _ => self.unexpected_token(),
            }
        }

        self.builder.finish_node(); // CLOSE_TAG
    }

    /// Keep a dangling `</` as an error node and complete the element with a
    /// zero-width closing tag positioned right after it.
    fn parse_dangling_close(&mut self) {
        let start = self.current_span().start;
        self.builder.start_node(MarkupSyntaxKind::ErrorNode);
        self.expect(MarkupSyntaxKind::LAngle);
        self.expect(MarkupSyntaxKind::Slash);
        self.builder.finish_node(); // ERROR_NODE

        self.error(
            "Expected a tag name after '</'",
            start..self.previous_end(),
            ParseErrorKind::DanglingCloseTag,
        );

        self.builder.start_node(MarkupSyntaxKind::CloseTag);
        self.builder.finish_node(); // CLOSE_TAG (phantom)
    }

    /// Text, comments, child expressions and tag-mode leftovers outside of any tag
    fn parse_content_token(&mut self) {
        match self.current_kind() {
            MarkupSyntaxKind::Text
            | MarkupSyntaxKind::Comment
            | MarkupSyntaxKind::Expression => {
                self.add_current_token();
                self.advance();
            }
            kind if kind.is_trivia() => {
                self.add_current_token();
                self.advance();
            }
            _ => self.unexpected_token(),
        }
    }

    // Helper methods

    /// Classify the tag that starts at the current `<` without consuming it
    fn tag_shape(&self) -> TagShape {
        let mut idx = self.pos + 1;
        idx = self.skip_trivia_from(idx);

        // `</` must be followed directly by a name or `>` to be a closing tag.
        // Anything else, trivia included, means it was typed in front of
        // existing text and is left dangling.
        if self.kind_at(idx) == MarkupSyntaxKind::Slash {
            return match self.kind_at(idx + 1) {
                MarkupSyntaxKind::Ident | MarkupSyntaxKind::RAngle => TagShape::Close,
                _ => TagShape::DanglingClose,
            };
        }

        while idx < self.tokens.len() {
            match self.tokens[idx].kind {
                MarkupSyntaxKind::SlashRAngle => return TagShape::SelfClosing,
                MarkupSyntaxKind::RAngle | MarkupSyntaxKind::LAngle | MarkupSyntaxKind::Eof => {
                    return TagShape::Open;
                }
                _ => idx += 1,
            }
        }
        TagShape::Open
    }

    fn skip_trivia_from(&self, mut idx: usize) -> usize {
        while self.kind_at(idx).is_trivia() {
            idx += 1;
        }
        idx
    }

    fn kind_at(&self, idx: usize) -> MarkupSyntaxKind {
        self.tokens
            .get(idx)
            .map(|t| t.kind)
            .unwrap_or(MarkupSyntaxKind::Eof)
    }

    fn peek_non_trivia(&self) -> MarkupSyntaxKind {
        self.kind_at(self.skip_trivia_from(self.pos))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len() || self.at(MarkupSyntaxKind::Eof)
    }

    fn current(&self) -> Option<&CstToken> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> MarkupSyntaxKind {
        self.kind_at(self.pos)
    }

    fn current_span(&self) -> Range<usize> {
        self.current()
            .map(|t| t.span.clone())
            .unwrap_or_else(|| {
                let end = self.previous_end();
                end..end
            })
    }

    /// End offset of the last consumed token
    fn previous_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
            .map(|t| t.span.end)
            .unwrap_or(0)
    }

    fn at(&self, kind: MarkupSyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn add_current_token(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.add_token(token);
        }
    }

    fn expect(&mut self, kind: MarkupSyntaxKind) {
        if self.at(kind) {
            self.add_current_token();
            self.advance();
        } else {
            let at = self.current_span().start;
            self.error(
                format!("Expected {kind}, found {}", self.current_kind()),
                at..at,
                ParseErrorKind::UnexpectedToken,
            );
        }
    }

    fn consume_trivia(&mut self) {
        while self.current_kind().is_trivia() {
            self.add_current_token();
            self.advance();
        }
    }

    /// Wrap the current token in an error node and move past it
    fn unexpected_token(&mut self) {
        let Some(token) = self.current() else {
            return;
        };
        let span = token.span.clone();
        let message = format!("Unexpected {}", token.kind);

        self.builder.start_node(MarkupSyntaxKind::ErrorNode);
        self.add_current_token();
        self.builder.finish_node();
        self.advance();

        self.error(message, span, ParseErrorKind::UnexpectedToken);
    }

    fn error(&mut self, message: impl Into<String>, span: Range<usize>, kind: ParseErrorKind) {
        self.errors.push(ParseError::new(message, span, kind));
    }
}
