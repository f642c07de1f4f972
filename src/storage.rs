//! JSON file persistence for a preferences document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{DocumentError, PreferencesDocument};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read '{}': {}", .0.display(), .1)]
    ReadError(PathBuf, #[source] io::Error),

    #[error("Failed to write '{}': {}", .0.display(), .1)]
    WriteError(PathBuf, #[source] io::Error),

    #[error("Failed to parse '{}': {}", .0.display(), .1)]
    ParseError(PathBuf, #[source] serde_json::Error),

    #[error("Failed to encode preferences: {0}")]
    EncodeError(#[from] serde_json::Error),

    #[error("Invalid preferences in '{}': {}", .0.display(), .1)]
    InvalidDocument(PathBuf, #[source] DocumentError),
}

/// What is written to disk: the document plus when it was last saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPreferences {
    pub updated_at: DateTime<Utc>,
    pub preferences: PreferencesDocument,
}

/// A preferences document stored at a fixed path.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
}

impl DocumentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored document.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    pub fn load(&self) -> Result<Option<StoredPreferences>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::ReadError(self.path.clone(), e)),
        };

        let stored: StoredPreferences = serde_json::from_str(&contents)
            .map_err(|e| StorageError::ParseError(self.path.clone(), e))?;
        stored
            .preferences
            .validate()
            .map_err(|e| StorageError::InvalidDocument(self.path.clone(), e))?;

        tracing::debug!(path = %self.path.display(), "Loaded preferences");
        Ok(Some(stored))
    }

    /// Writes the document, creating parent directories as needed.
    pub fn save(&self, doc: &PreferencesDocument) -> Result<StoredPreferences, StorageError> {
        let stored = StoredPreferences {
            updated_at: Utc::now(),
            preferences: doc.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StorageError::WriteError(self.path.clone(), e))?;
            }
        }
        fs::write(&self.path, json).map_err(|e| StorageError::WriteError(self.path.clone(), e))?;

        tracing::debug!(path = %self.path.display(), "Saved preferences");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FavoriteFood, MealType};
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempdir().unwrap();
        let file = DocumentFile::new(temp_dir.path().join("prefs.json"));
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = tempdir().unwrap();
        let file = DocumentFile::new(temp_dir.path().join("nested").join("prefs.json"));

        let mut doc = PreferencesDocument::sample();
        doc.special_instructions = "Warm meals".into();
        file.save(&doc).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.preferences, doc);
    }

    #[test]
    fn test_load_rejects_invalid_document() {
        let temp_dir = tempdir().unwrap();
        let file = DocumentFile::new(temp_dir.path().join("prefs.json"));

        let mut doc = PreferencesDocument::sample();
        doc.favorites
            .push(FavoriteFood::new("1", "Toast", MealType::Breakfast));
        file.save(&doc).unwrap();

        let err = file.load().unwrap_err();
        assert!(matches!(err, StorageError::InvalidDocument(..)));
        assert!(err.to_string().contains("Duplicate favorites id"));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("prefs.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = DocumentFile::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
