//! Meal preferences for a single resident.
//!
//! The [`PreferenceStore`] owns the document and is the only way to change
//! it. [`Overview`] derives the summary counters, and every applied change is
//! kept in the store's [`ChangeLog`].

pub mod bounded_text;
pub mod change_log;
pub mod models;
pub mod notification;
pub mod overview;
pub mod storage;
pub mod store;
pub mod suggestions;

pub use bounded_text::BoundedText;
pub use change_log::{Change, ChangeEntry, ChangeLog};
pub use models::{
    Allergy, AllergyFields, DislikeFields, DislikedFood, DocumentError, FavoriteFields,
    FavoriteFood, MealType, PreferencesDocument, RecordId, Seed, Severity,
    INSTRUCTIONS_MAX_CHARS,
};
pub use notification::{Notification, NotificationKind, Notifier};
pub use overview::Overview;
pub use storage::{DocumentFile, StorageError, StoredPreferences};
pub use store::PreferenceStore;
pub use suggestions::Collection;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_seeded_session_scenario() {
        let mut store = PreferenceStore::new(Seed::Sample.document());

        let id = store
            .add_favorite(FavoriteFields::new("Yogurt", MealType::Snacks))
            .unwrap();
        assert_eq!(store.document().favorites.len(), 2);
        assert_eq!(store.overview().favorites_count, 2);
        assert_eq!(store.document().favorites.last().unwrap().id, id);

        let tree_nuts = store
            .document()
            .allergies
            .iter()
            .find(|a| a.name == "Tree nuts")
            .map(|a| a.id.clone())
            .unwrap();
        assert!(store.edit_allergy(
            &tree_nuts,
            AllergyFields::new("Tree nuts", Severity::Moderate)
        ));
        assert_eq!(store.document().allergies[0].id, tree_nuts);
        assert_eq!(store.document().allergies[0].severity, Severity::Moderate);

        assert!(!store.set_instructions("x".repeat(501)));
        let field = store.instructions_field();
        assert_eq!(field.remaining(), INSTRUCTIONS_MAX_CHARS);
        assert!(!field.is_at_limit());
    }
}
