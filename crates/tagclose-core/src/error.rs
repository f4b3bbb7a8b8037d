//! Error types for the collaborators around closing-tag completion
//!
//! Resolution and planning never fail; these errors come from the document
//! store, position mapping, configuration and edit application.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tagclose operations
#[derive(Debug, Error)]
pub enum TagCloseError {
    /// The document was never opened or has been closed
    #[error("Unknown document: {id}")]
    UnknownDocument { id: String },

    /// A line/column position that does not exist in the document
    #[error("Position {line}:{column} is outside the document")]
    InvalidPosition { line: u32, column: u32 },

    /// An offset past the end of the document or inside a character
    #[error("Offset {offset} is outside the document (length {len})")]
    InvalidOffset { offset: usize, len: usize },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The host refused or failed to apply an edit
    #[error("Edit error: {message}")]
    EditError { message: String },

    /// LSP transport errors
    #[error("LSP error: {message}")]
    LspError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Document,
    Position,
    Config,
    Io,
    Edit,
    Lsp,
}

impl TagCloseError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TagCloseError::UnknownDocument { .. } => ErrorKind::Document,
            TagCloseError::InvalidPosition { .. } | TagCloseError::InvalidOffset { .. } => {
                ErrorKind::Position
            }
            TagCloseError::ConfigError { .. } => ErrorKind::Config,
            TagCloseError::IoError { .. } => ErrorKind::Io,
            TagCloseError::EditError { .. } => ErrorKind::Edit,
            TagCloseError::LspError { .. } => ErrorKind::Lsp,
        }
    }

    /// Errors a keystroke handler can swallow and treat as "do nothing"
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Document | ErrorKind::Position | ErrorKind::Edit
        )
    }

    pub fn unknown_document(id: impl std::fmt::Display) -> Self {
        Self::UnknownDocument { id: id.to_string() }
    }

    pub fn invalid_position(line: u32, column: u32) -> Self {
        Self::InvalidPosition { line, column }
    }

    pub fn invalid_offset(offset: usize, len: usize) -> Self {
        Self::InvalidOffset { offset, len }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    pub fn edit_error(message: impl Into<String>) -> Self {
        Self::EditError {
            message: message.into(),
        }
    }

    pub fn lsp_error(message: impl Into<String>) -> Self {
        Self::LspError {
            message: message.into(),
        }
    }
}
