//! Persisted last-selection hint.
//!
//! A single JSON file remembers which module/topic was selected last so
//! the next session can restore it. It is read once at startup and is
//! never consulted as live state; a missing or corrupt file simply means
//! no hint.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct SelectionFile {
    path: PathBuf,
}

impl SelectionFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The stored hint; absence and corruption both read as "no hint".
    #[must_use]
    pub fn load(&self) -> LastSelection {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return LastSelection::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(%err, path = %self.path.display(), "ignoring corrupt selection file");
            LastSelection::default()
        })
    }

    pub fn store(&self, selection: LastSelection) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(&selection)?;
        fs::write(&self.path, raw)
    }

    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}
