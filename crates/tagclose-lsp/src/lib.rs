//! tagclose Language Server Protocol (LSP)
//!
//! Completes the closing tag when `</` is typed in HTML, XML, JSX and
//! similar markup documents.

pub mod convert;
pub mod server;

pub use server::TagCloseLanguageServer;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
