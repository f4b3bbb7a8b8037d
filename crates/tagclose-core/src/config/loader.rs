//! Configuration file discovery and loading

use super::TagCloseConfig;
use crate::Result;
use crate::error::TagCloseError;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names in priority order
const CONFIG_FILE_NAMES: [&str; 2] = [".tagcloserc.toml", ".tagcloserc.json"];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by traversing upward from `start_path`
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path
            .canonicalize()
            .map_err(|e| TagCloseError::config_error(format!("Invalid path: {e}")))?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file (`.toml` or `.json`)
    pub fn load_from_file(path: &Path) -> Result<TagCloseConfig> {
        let content = fs::read_to_string(path).map_err(|e| TagCloseError::io_error(path, e))?;

        let parsed = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            _ => Err("Unsupported file extension (expected .toml or .json)".to_string()),
        };

        parsed.map_err(|message| {
            TagCloseError::config_error(format!(
                "Failed to load config from '{}': {}",
                path.display(),
                message
            ))
        })
    }

    /// Load config from an explicit path, or auto-discover from `start_dir`
    ///
    /// An explicit path must exist. When discovery finds nothing, the
    /// defaults are returned.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<TagCloseConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(TagCloseError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found; using defaults");
                Ok(TagCloseConfig::default())
            }
        }
    }
}
