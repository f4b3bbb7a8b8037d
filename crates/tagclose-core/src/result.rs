//! Result type alias for tagclose operations

use crate::error::TagCloseError;

/// Standard Result type for tagclose operations
pub type Result<T> = std::result::Result<T, TagCloseError>;

/// Extension trait for turning collaborator failures into a silent no-op
pub trait ResultExt<T> {
    /// Log the error and continue with None
    ///
    /// A keystroke must never fail because a collaborator did; the caller
    /// simply does nothing and the typed text stays as it is.
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn log_and_continue(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) if err.is_recoverable() => {
                tracing::debug!("Skipping auto-close: {}", err);
                None
            }
            Err(err) => {
                tracing::warn!("Skipping auto-close after error: {}", err);
                None
            }
        }
    }
}
