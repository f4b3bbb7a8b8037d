//! Configuration for closing-tag completion
//!
//! ## Configuration Files
//!
//! - `.tagcloserc.toml` - TOML
//! - `.tagcloserc.json` - JSON
//!
//! When no explicit path is given, the loader searches from the workspace
//! root upward until a config file is found or the filesystem root is
//! reached. No file at all means the defaults apply.
//!
//! ## Example Configuration
//!
//! ```toml
//! enabled = true
//! extensions = ["html", "tsx", "jsx"]
//! languages = ["html", "typescriptreact"]
//! excludedTags = ["br", "img"]
//! ```

mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

/// Closing-tag completion settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TagCloseConfig {
    /// Master switch
    pub enabled: bool,

    /// LSP language ids completion is active for
    pub languages: Vec<String>,

    /// File extensions completion is active for, matched case-insensitively
    pub extensions: Vec<String>,

    /// Tag names that are never completed
    pub excluded_tags: Vec<String>,
}

impl Default for TagCloseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            languages: [
                "html",
                "xml",
                "javascriptreact",
                "typescriptreact",
                "vue",
                "svelte",
            ]
            .map(String::from)
            .to_vec(),
            extensions: [
                "html", "htm", "xml", "xhtml", "svg", "jsx", "tsx", "vue", "svelte",
            ]
            .map(String::from)
            .to_vec(),
            excluded_tags: Vec::new(),
        }
    }
}

impl TagCloseConfig {
    /// Whether completion applies to a document
    ///
    /// A document qualifies when its language id or its file extension is
    /// listed. Documents reporting neither never qualify.
    pub fn is_enabled_for(&self, extension: Option<&str>, language_id: Option<&str>) -> bool {
        if !self.enabled {
            return false;
        }

        let by_language =
            language_id.is_some_and(|lang| self.languages.iter().any(|l| l == lang));
        let by_extension = extension.is_some_and(|ext| {
            self.extensions
                .iter()
                .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
        });

        by_language || by_extension
    }

    pub fn is_excluded(&self, tag: &str) -> bool {
        self.excluded_tags.iter().any(|t| t == tag)
    }
}
