use chrono::{DateTime, Utc};
use mealprefs::{DocumentFile, PreferenceStore, StorageError};

use crate::config::Config;

/// A store opened from the data file, or from the configured seed when no
/// file exists yet.
pub struct Session {
    pub store: PreferenceStore,
    pub updated_at: Option<DateTime<Utc>>,
    file: DocumentFile,
    saved_revision: u64,
}

impl Session {
    pub fn open(config: &Config) -> Result<Self, StorageError> {
        let file = DocumentFile::new(config.data_file.value.clone());
        let (doc, updated_at) = match file.load()? {
            Some(stored) => (stored.preferences, Some(stored.updated_at)),
            None => {
                tracing::debug!(seed = %config.seed.value, "No saved preferences, using seed");
                (config.seed.value.document(), None)
            }
        };

        Ok(Self {
            store: PreferenceStore::new(doc),
            updated_at,
            file,
            saved_revision: 0,
        })
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.store.revision() != self.saved_revision
    }

    pub fn save(&mut self) -> Result<(), StorageError> {
        let stored = self.file.save(self.store.document())?;
        self.updated_at = Some(stored.updated_at);
        self.saved_revision = self.store.revision();
        Ok(())
    }

    pub fn file(&self) -> &DocumentFile {
        &self.file
    }
}
