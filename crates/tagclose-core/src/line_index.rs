//! Mapping between editor positions and linear offsets
//!
//! Positions are zero-based `(line, character)` pairs where `character`
//! counts UTF-16 code units, which is what LSP clients send by default.
//! Offsets are UTF-8 byte offsets into the document, the unit the CST uses.

use std::sync::Arc;

use rowan::TextSize;

use crate::Result;
use crate::error::TagCloseError;

/// A zero-based line/column position with UTF-16 columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Line start table over a snapshot of document text
#[derive(Debug, Clone)]
pub struct LineIndex {
    text: Arc<str>,
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self { text, line_starts }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> TextSize {
        text_size(self.text.len())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a position to a byte offset
    ///
    /// A column past the end of its line is clamped to the line end, as the
    /// language server protocol requires. A line past the end of the document is an
    /// error.
    pub fn offset(&self, position: Position) -> Result<TextSize> {
        let line = position.line as usize;
        let Some(&line_start) = self.line_starts.get(line) else {
            return Err(TagCloseError::invalid_position(
                position.line,
                position.character,
            ));
        };

        let line_text = self.line_text(line);
        let mut utf16_col = 0u32;
        for (idx, ch) in line_text.char_indices() {
            if utf16_col >= position.character {
                return Ok(text_size(line_start + idx));
            }
            utf16_col += ch.len_utf16() as u32;
        }
        Ok(text_size(line_start + line_text.len()))
    }

    /// Convert a byte offset to a position
    pub fn position(&self, offset: TextSize) -> Result<Position> {
        let offset = usize::from(offset);
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return Err(TagCloseError::invalid_offset(offset, self.text.len()));
        }

        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];
        let character: usize = self.text[line_start..offset]
            .chars()
            .map(char::len_utf16)
            .sum();

        Ok(Position::new(line as u32, character as u32))
    }

    /// Move `chars` characters forward from `position`, crossing line breaks
    /// and stopping at the end of the document
    pub fn advance(&self, position: Position, chars: usize) -> Result<Position> {
        let start = usize::from(self.offset(position)?);
        let end = self.text[start..]
            .char_indices()
            .nth(chars)
            .map(|(rel, _)| start + rel)
            .unwrap_or(self.text.len());
        self.position(text_size(end))
    }

    /// Text of `line` without its line terminator
    fn line_text(&self, line: usize) -> &str {
        let start = self.line_starts[line];
        let end = self
            .line_starts
            .get(line + 1)
            .map(|&next| next - 1)
            .unwrap_or(self.text.len());
        self.text[start..end].trim_end_matches('\r')
    }
}

fn text_size(offset: usize) -> TextSize {
    TextSize::try_from(offset).unwrap_or(TextSize::from(u32::MAX))
}
