use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, Result};

/// Default number of events kept in the history
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 100;

/// Catalogue settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Maximum number of history entries to keep, oldest dropped first
    pub max_history_size: usize,
    /// Maximum number of patrons queued per book, unbounded when `None`
    pub max_waitlist_len: Option<usize>,
    /// Attach the console logger and notification observers on creation
    pub register_default_observers: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            max_waitlist_len: None,
            register_default_observers: true,
        }
    }
}

impl LibraryConfig {
    /// Parse settings from a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Config` if the JSON parsing fails
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| LibraryError::Config(format!("Failed to parse JSON: {e}")))
    }

    /// Load settings from a JSON file
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Config` if:
    /// - The file cannot be read
    /// - The JSON parsing fails
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            LibraryError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&contents)
    }
}
