//! Durable viewer preferences.
//!
//! The viewer remembers one thing between visits: the language the user
//! picked last. It is read at startup when the URL carries no `lang`
//! parameter and written on every explicit language change.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Error while persisting preferences.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// I/O error writing the preference file.
    #[error("failed to write preferences to {}: {source}", path.display())]
    Io {
        /// Preference file path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Serialization error.
    #[error("failed to encode preferences: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable storage for the last selected language.
pub trait Preferences: Send + Sync {
    /// Last stored language, if any.
    ///
    /// Unreadable storage is treated as empty.
    fn language(&self) -> Option<String>;

    /// Remember `language` for later visits.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError`] if the value cannot be persisted.
    fn set_language(&self, language: &str) -> Result<(), PreferenceError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

/// Preferences stored as a small JSON file.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    /// Create preferences backed by the file at `path`.
    ///
    /// The file and its parent directory are created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Preference file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> StoredPreferences {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return StoredPreferences::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Ignoring malformed preferences");
            StoredPreferences::default()
        })
    }
}

impl Preferences for FilePreferences {
    fn language(&self) -> Option<String> {
        self.read().language
    }

    fn set_language(&self, language: &str) -> Result<(), PreferenceError> {
        let mut stored = self.read();
        stored.language = Some(language.to_owned());
        let json = serde_json::to_string_pretty(&stored)?;

        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.path, json).map_err(io_err)
    }
}

/// In-memory preferences, for tests and sessions that should not persist.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    language: RwLock<Option<String>>,
}

impl MemoryPreferences {
    /// Create empty preferences.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create preferences with a stored language.
    #[must_use]
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: RwLock::new(Some(language.into())),
        }
    }
}

impl Preferences for MemoryPreferences {
    fn language(&self) -> Option<String> {
        self.language.read().ok()?.clone()
    }

    fn set_language(&self, language: &str) -> Result<(), PreferenceError> {
        if let Ok(mut stored) = self.language.write() {
            *stored = Some(language.to_owned());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_preferences_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferences::new(dir.path().join("prefs.json"));

        assert_eq!(prefs.language(), None);
    }

    #[test]
    fn test_file_preferences_round_trip_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".rn").join("preferences.json");
        let prefs = FilePreferences::new(&path);

        prefs.set_language("en").unwrap();

        assert!(path.exists());
        assert_eq!(FilePreferences::new(&path).language(), Some("en".to_owned()));
    }

    #[test]
    fn test_file_preferences_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferences::new(dir.path().join("prefs.json"));

        prefs.set_language("en").unwrap();
        prefs.set_language("fr").unwrap();

        assert_eq!(prefs.language(), Some("fr".to_owned()));
    }

    #[test]
    fn test_file_preferences_malformed_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        assert_eq!(FilePreferences::new(&path).language(), None);
    }

    #[test]
    fn test_memory_preferences() {
        let prefs = MemoryPreferences::new();
        assert_eq!(prefs.language(), None);

        prefs.set_language("de").unwrap();

        assert_eq!(prefs.language(), Some("de".to_owned()));
        assert_eq!(
            MemoryPreferences::with_language("en").language(),
            Some("en".to_owned())
        );
    }
}
