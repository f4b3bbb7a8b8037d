//! CST-aware lexer for markup that preserves all source text
//!
//! The lexer has two modes. Outside tags it produces `Text`, `Comment` and
//! balanced `{ ... }` `Expression` tokens; a `<` switches into tag mode, where names, attribute values,
//! punctuation and trivia are tokenized until the matching `>` or `/>`.
//! Every byte of input ends up in exactly one token, so
//! `parse(source).text() == source`.

use crate::cst::MarkupSyntaxKind;
use std::ops::Range;

/// Simple span representing a range in the source
pub type CstSpan = Range<usize>;

/// A lexer error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub message: String,
    pub span: CstSpan,
}

impl LexerError {
    pub fn new(message: impl Into<String>, span: CstSpan) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// A token with its syntax kind and span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CstToken {
    pub kind: MarkupSyntaxKind,
    pub text: String,
    pub span: CstSpan,
}

impl CstToken {
    pub fn new(kind: MarkupSyntaxKind, text: impl Into<String>, span: CstSpan) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

/// Result returned by the CST lexer
pub type CstLexResult = (Vec<CstToken>, Vec<LexerError>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Content,
    Tag,
}

/// Lex markup preserving ALL source text for CST construction
///
/// The returned token stream always ends with a zero-width `Eof` token.
pub fn lex_with_trivia(input: &str) -> CstLexResult {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    let len = input.len();
    let mut i = 0usize;
    let mut mode = Mode::Content;

    while i < len {
        let Some((current, size)) = next_char(input, i) else {
            break;
        };
        let start = i;

        match mode {
            Mode::Content => {
                if input[start..].starts_with("<!--") {
                    let (end, error) = lex_comment(input, start);
                    if let Some(err) = error {
                        errors.push(err);
                    }
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::Comment,
                        &input[start..end],
                        span(start, end),
                    ));
                    i = end;
                } else if current == '<' {
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::LAngle,
                        "<",
                        span(start, start + size),
                    ));
                    mode = Mode::Tag;
                    i += size;
                } else if current == '{'
                    && let (end, None) = lex_expression(input, start)
                {
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::Expression,
                        &input[start..end],
                        span(start, end),
                    ));
                    i = end;
                } else {
                    // Character data runs until the next tag opener or expression;
                    // an unbalanced `{` in plain markup is just text
                    let end = input[start + size..]
                        .find(['<', '{'])
                        .map(|rel| start + size + rel)
                        .unwrap_or(len);
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::Text,
                        &input[start..end],
                        span(start, end),
                    ));
                    i = end;
                }
            }
            Mode::Tag => match current {
                '\n' => {
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::Newline,
                        "\n",
                        span(start, start + size),
                    ));
                    i += size;
                }
                '\r' => {
                    let mut end = start + size;
                    if let Some(('\n', nl_size)) = next_char(input, end) {
                        end += nl_size;
                    }
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::Newline,
                        &input[start..end],
                        span(start, end),
                    ));
                    i = end;
                }
                c if c.is_whitespace() => {
                    let end = consume_while(input, start, |c| {
                        c.is_whitespace() && c != '\n' && c != '\r'
                    });
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::Whitespace,
                        &input[start..end],
                        span(start, end),
                    ));
                    i = end;
                }
                '<' => {
                    // A new tag starts before the previous one was terminated;
                    // the parser reports the unterminated tag.
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::LAngle,
                        "<",
                        span(start, start + size),
                    ));
                    i += size;
                }
                '>' => {
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::RAngle,
                        ">",
                        span(start, start + size),
                    ));
                    mode = Mode::Content;
                    i += size;
                }
                '/' => {
                    if let Some(('>', gt_size)) = next_char(input, start + size) {
                        let end = start + size + gt_size;
                        tokens.push(CstToken::new(
                            MarkupSyntaxKind::SlashRAngle,
                            "/>",
                            span(start, end),
                        ));
                        mode = Mode::Content;
                        i = end;
                    } else {
                        tokens.push(CstToken::new(
                            MarkupSyntaxKind::Slash,
                            "/",
                            span(start, start + size),
                        ));
                        i += size;
                    }
                }
                '=' => {
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::Equals,
                        "=",
                        span(start, start + size),
                    ));
                    i += size;
                }
                '.' => {
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::Dot,
                        ".",
                        span(start, start + size),
                    ));
                    i += size;
                }
                ':' => {
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::Colon,
                        ":",
                        span(start, start + size),
                    ));
                    i += size;
                }
                '"' | '\'' => {
                    let (end, error) = lex_string(input, start, current);
                    if let Some(err) = error {
                        errors.push(err);
                    }
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::String,
                        &input[start..end],
                        span(start, end),
                    ));
                    i = end;
                }
                '{' => {
                    let (end, error) = lex_expression(input, start);
                    if let Some(err) = error {
                        errors.push(err);
                    }
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::Expression,
                        &input[start..end],
                        span(start, end),
                    ));
                    i = end;
                }
                c if is_ident_char(c) => {
                    let end = consume_while(input, start, is_ident_char);
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::Ident,
                        &input[start..end],
                        span(start, end),
                    ));
                    i = end;
                }
                other => {
                    errors.push(LexerError::new(
                        format!("Unexpected character '{other}' in tag"),
                        span(start, start + size),
                    ));
                    tokens.push(CstToken::new(
                        MarkupSyntaxKind::Error,
                        &input[start..start + size],
                        span(start, start + size),
                    ));
                    i += size;
                }
            },
        }
    }

    tokens.push(CstToken::new(MarkupSyntaxKind::Eof, "", span(len, len)));
    (tokens, errors)
}

/// Lex a `<!-- ... -->` comment starting at `start`
fn lex_comment(input: &str, start: usize) -> (usize, Option<LexerError>) {
    let body = start + "<!--".len();
    match input[body..].find("-->") {
        Some(rel) => (body + rel + "-->".len(), None),
        None => (
            input.len(),
            Some(LexerError::new(
                "Unterminated comment",
                span(start, input.len()),
            )),
        ),
    }
}

/// Lex a quoted attribute value; `quote` is the opening quote character
fn lex_string(input: &str, start: usize, quote: char) -> (usize, Option<LexerError>) {
    let body = start + quote.len_utf8();
    match input[body..].find(quote) {
        Some(rel) => (body + rel + quote.len_utf8(), None),
        None => (
            input.len(),
            Some(LexerError::new("Unterminated string", span(start, input.len()))),
        ),
    }
}

/// Lex a balanced `{ ... }` expression, honoring nested braces and string literals
fn lex_expression(input: &str, start: usize) -> (usize, Option<LexerError>) {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (rel, c) in input[start..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return (start + rel + 1, None);
                }
            }
            _ => {}
        }
    }

    (
        input.len(),
        Some(LexerError::new(
            "Unterminated expression",
            span(start, input.len()),
        )),
    )
}

fn consume_while(input: &str, start: usize, pred: impl Fn(char) -> bool) -> usize {
    input[start..]
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map(|(rel, _)| start + rel)
        .unwrap_or(input.len())
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '$')
}

/// Get the next character and its byte length
fn next_char(input: &str, pos: usize) -> Option<(char, usize)> {
    input[pos..].chars().next().map(|c| (c, c.len_utf8()))
}

/// Create a span from start to end
fn span(start: usize, end: usize) -> CstSpan {
    start..end
}
