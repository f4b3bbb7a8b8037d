//! tagclose core
//!
//! Closing-tag completion for markup editors. Typing `</` after an open tag
//! resolves the innermost unclosed tag at the cursor and plans the insertion
//! of its name and `>`, plus where the cursor goes afterwards.
//!
//! The pure pieces are [`resolve_close_tag`] and [`plan_edit`]. The
//! [`ChangeListener`] ties them to editor change events, and
//! [`AutoCloseEdit::apply`] performs the two-phase application through an
//! [`EditApplier`].

pub mod config;
pub mod cst; // Concrete Syntax Tree (lossless, Rowan-based)
pub mod document;
pub mod edit;
pub mod error;
pub mod line_index;
pub mod listener;
pub mod planner;
pub mod provider;
pub mod resolver;
pub mod result;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoader, TagCloseConfig};
pub use document::{ContentChange, DocumentId};
pub use edit::{AutoCloseEdit, EditApplier, FollowUps, StoreApplier, TextEdit};
pub use error::{ErrorKind, TagCloseError};
pub use line_index::{LineIndex, Position};
pub use listener::ChangeListener;
pub use planner::{EditPlan, plan_edit};
pub use provider::{TextSource, TreeProvider};
pub use resolver::resolve_close_tag;
pub use result::{Result, ResultExt};
pub use store::DocumentStore;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "tagclose=info";

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    init_tracing_with(DEFAULT_LOG_FILTER);
}

/// Initialize tracing with `default_filter` applying when `RUST_LOG` is unset
///
/// Output goes to stderr; stdout is reserved for protocol traffic.
pub fn init_tracing_with(default_filter: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
