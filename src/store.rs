//! The preference store.
//!
//! Owns the resident's document and is the only way to change it. Each
//! mutation writes through `Arc::make_mut`, so snapshots handed out earlier
//! keep seeing the document as it was.
//!
//! Invalid input (blank names, over-long instructions) and unknown ids are
//! absorbed: the call returns `None`/`false` and nothing changes. Edits and
//! removals aimed at an unknown id are still written to the change log, so
//! use `revision()` to tell whether the document moved.

use std::sync::Arc;

use crate::bounded_text::BoundedText;
use crate::change_log::{Change, ChangeLog};
use crate::models::{
    Allergy, AllergyFields, DislikeFields, DislikedFood, FavoriteFields, FavoriteFood,
    IdGenerator, PreferencesDocument, RecordId, INSTRUCTIONS_MAX_CHARS,
};
use crate::overview::Overview;

trait Record {
    fn id(&self) -> &RecordId;
}

impl Record for FavoriteFood {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for DislikedFood {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for Allergy {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

fn position<T: Record>(records: &[T], id: &RecordId) -> Option<usize> {
    records.iter().position(|r| r.id() == id)
}

/// Trimmed name, or `None` if nothing is left.
fn clean_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn clean_note(note: Option<String>) -> Option<String> {
    note.and_then(|n| clean_name(&n))
}

#[derive(Debug)]
pub struct PreferenceStore {
    doc: Arc<PreferencesDocument>,
    ids: IdGenerator,
    log: ChangeLog,
    revision: u64,
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new(PreferencesDocument::default())
    }
}

impl PreferenceStore {
    pub fn new(doc: PreferencesDocument) -> Self {
        Self {
            doc: Arc::new(doc),
            ids: IdGenerator::new(),
            log: ChangeLog::new(),
            revision: 0,
        }
    }

    /// Read-only view of the current document.
    pub fn document(&self) -> &PreferencesDocument {
        &self.doc
    }

    /// The current document as an owned handle that later mutations leave untouched.
    pub fn snapshot(&self) -> Arc<PreferencesDocument> {
        Arc::clone(&self.doc)
    }

    pub fn overview(&self) -> Overview {
        Overview::of(&self.doc)
    }

    pub fn change_log(&self) -> &ChangeLog {
        &self.log
    }

    /// Number of applied mutations since the store was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn clear_change_log(&mut self) {
        self.log.clear();
    }

    /// The special instructions wrapped with their character limit.
    pub fn instructions_field(&self) -> BoundedText {
        let mut field = BoundedText::new(INSTRUCTIONS_MAX_CHARS);
        field.update(self.doc.special_instructions.clone());
        field
    }

    fn record(&mut self, change: Change) {
        self.revision += 1;
        self.log.record(change);
    }

    fn fresh_id<T: Record>(ids: &mut IdGenerator, existing: &[T]) -> RecordId {
        loop {
            let id = ids.next_id();
            if position(existing, &id).is_none() {
                return id;
            }
        }
    }

    // Favorites

    pub fn add_favorite(&mut self, fields: FavoriteFields) -> Option<RecordId> {
        let Some(name) = clean_name(&fields.name) else {
            tracing::debug!("Rejected favorite food with blank name");
            return None;
        };
        let id = Self::fresh_id(&mut self.ids, &self.doc.favorites);
        let food = FavoriteFood::new(id.clone(), name, fields.meal_type);

        Arc::make_mut(&mut self.doc).favorites.push(food.clone());
        self.record(Change::AddFavorite(food));
        Some(id)
    }

    pub fn edit_favorite(&mut self, id: &RecordId, fields: FavoriteFields) -> bool {
        let Some(name) = clean_name(&fields.name) else {
            tracing::debug!(%id, "Rejected favorite food edit with blank name");
            return false;
        };
        let fields = FavoriteFields::new(name, fields.meal_type);
        let Some(index) = position(&self.doc.favorites, id) else {
            tracing::debug!(%id, "Favorite food not found for edit");
            self.log.record(Change::EditFavorite {
                id: id.clone(),
                fields,
            });
            return false;
        };

        let food = &mut Arc::make_mut(&mut self.doc).favorites[index];
        food.name = fields.name.clone();
        food.meal_type = fields.meal_type;

        self.record(Change::EditFavorite {
            id: id.clone(),
            fields,
        });
        true
    }

    pub fn remove_favorite(&mut self, id: &RecordId) -> bool {
        let Some(index) = position(&self.doc.favorites, id) else {
            tracing::debug!(%id, "Favorite food not found for removal");
            self.log.record(Change::RemoveFavorite { id: id.clone() });
            return false;
        };
        Arc::make_mut(&mut self.doc).favorites.remove(index);
        self.record(Change::RemoveFavorite { id: id.clone() });
        true
    }

    // Dislikes

    pub fn add_dislike(&mut self, fields: DislikeFields) -> Option<RecordId> {
        let Some(name) = clean_name(&fields.name) else {
            tracing::debug!("Rejected disliked food with blank name");
            return None;
        };
        let id = Self::fresh_id(&mut self.ids, &self.doc.dislikes);
        let food = DislikedFood {
            id: id.clone(),
            name,
            severity: fields.severity,
            reason: clean_note(fields.reason),
        };

        Arc::make_mut(&mut self.doc).dislikes.push(food.clone());
        self.record(Change::AddDislike(food));
        Some(id)
    }

    pub fn edit_dislike(&mut self, id: &RecordId, fields: DislikeFields) -> bool {
        let Some(name) = clean_name(&fields.name) else {
            tracing::debug!(%id, "Rejected disliked food edit with blank name");
            return false;
        };
        let fields = DislikeFields {
            name,
            severity: fields.severity,
            reason: clean_note(fields.reason),
        };
        let Some(index) = position(&self.doc.dislikes, id) else {
            tracing::debug!(%id, "Disliked food not found for edit");
            self.log.record(Change::EditDislike {
                id: id.clone(),
                fields,
            });
            return false;
        };

        let food = &mut Arc::make_mut(&mut self.doc).dislikes[index];
        food.name = fields.name.clone();
        food.severity = fields.severity;
        food.reason = fields.reason.clone();

        self.record(Change::EditDislike {
            id: id.clone(),
            fields,
        });
        true
    }

    pub fn remove_dislike(&mut self, id: &RecordId) -> bool {
        let Some(index) = position(&self.doc.dislikes, id) else {
            tracing::debug!(%id, "Disliked food not found for removal");
            self.log.record(Change::RemoveDislike { id: id.clone() });
            return false;
        };
        Arc::make_mut(&mut self.doc).dislikes.remove(index);
        self.record(Change::RemoveDislike { id: id.clone() });
        true
    }

    // Allergies

    pub fn add_allergy(&mut self, fields: AllergyFields) -> Option<RecordId> {
        let Some(name) = clean_name(&fields.name) else {
            tracing::debug!("Rejected allergy with blank name");
            return None;
        };
        let id = Self::fresh_id(&mut self.ids, &self.doc.allergies);
        let allergy = Allergy {
            id: id.clone(),
            name,
            severity: fields.severity,
            reaction: clean_note(fields.reaction),
        };

        Arc::make_mut(&mut self.doc).allergies.push(allergy.clone());
        self.record(Change::AddAllergy(allergy));
        Some(id)
    }

    pub fn edit_allergy(&mut self, id: &RecordId, fields: AllergyFields) -> bool {
        let Some(name) = clean_name(&fields.name) else {
            tracing::debug!(%id, "Rejected allergy edit with blank name");
            return false;
        };
        let fields = AllergyFields {
            name,
            severity: fields.severity,
            reaction: clean_note(fields.reaction),
        };
        let Some(index) = position(&self.doc.allergies, id) else {
            tracing::debug!(%id, "Allergy not found for edit");
            self.log.record(Change::EditAllergy {
                id: id.clone(),
                fields,
            });
            return false;
        };

        let allergy = &mut Arc::make_mut(&mut self.doc).allergies[index];
        allergy.name = fields.name.clone();
        allergy.severity = fields.severity;
        allergy.reaction = fields.reaction.clone();

        self.record(Change::EditAllergy {
            id: id.clone(),
            fields,
        });
        true
    }

    pub fn remove_allergy(&mut self, id: &RecordId) -> bool {
        let Some(index) = position(&self.doc.allergies, id) else {
            tracing::debug!(%id, "Allergy not found for removal");
            self.log.record(Change::RemoveAllergy { id: id.clone() });
            return false;
        };
        Arc::make_mut(&mut self.doc).allergies.remove(index);
        self.record(Change::RemoveAllergy { id: id.clone() });
        true
    }

    // Special instructions

    /// Replaces the instructions. Text over the limit is rejected whole.
    pub fn set_instructions(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if !BoundedText::fits(INSTRUCTIONS_MAX_CHARS, &text) {
            tracing::debug!(
                chars = text.chars().count(),
                "Rejected special instructions over the character limit"
            );
            return false;
        }
        Arc::make_mut(&mut self.doc).special_instructions = text.clone();
        self.record(Change::UpdateInstructions { text });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealType, Severity};
    use std::collections::HashSet;

    fn sample_store() -> PreferenceStore {
        PreferenceStore::new(PreferencesDocument::sample())
    }

    #[test]
    fn test_add_favorite_appends_with_fresh_id() {
        let mut store = sample_store();
        let before: HashSet<_> = store.document().favorites.iter().map(|f| f.id.clone()).collect();

        let id = store
            .add_favorite(FavoriteFields::new("Yogurt", MealType::Snacks))
            .unwrap();

        let favorites = &store.document().favorites;
        assert_eq!(favorites.len(), 2);
        assert!(!before.contains(&id));
        let last = favorites.last().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.name, "Yogurt");
        assert_eq!(last.meal_type, MealType::Snacks);
        assert_eq!(store.overview().favorites_count, 2);
    }

    #[test]
    fn test_add_trims_name() {
        let mut store = PreferenceStore::default();
        store.add_allergy(AllergyFields::new("  Shellfish ", Severity::Severe));
        assert_eq!(store.document().allergies[0].name, "Shellfish");
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut store = sample_store();
        assert!(store
            .add_favorite(FavoriteFields::new("   ", MealType::Lunch))
            .is_none());
        assert!(store
            .add_dislike(DislikeFields::new("", Severity::Mild))
            .is_none());
        assert!(store
            .add_allergy(AllergyFields::new("\t", Severity::Mild))
            .is_none());

        assert_eq!(store.document(), &PreferencesDocument::sample());
        assert!(store.change_log().is_empty());
    }

    #[test]
    fn test_ids_stay_unique_across_many_adds() {
        let mut store = PreferenceStore::default();
        for i in 0..200 {
            store.add_dislike(DislikeFields::new(format!("Food {}", i), Severity::Mild));
        }
        let ids: HashSet<_> = store.document().dislikes.iter().map(|d| &d.id).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_same_name_may_be_added_twice() {
        let mut store = PreferenceStore::default();
        let a = store.add_favorite(FavoriteFields::new("Toast", MealType::Breakfast));
        let b = store.add_favorite(FavoriteFields::new("Toast", MealType::Breakfast));
        assert_ne!(a, b);
        assert_eq!(store.document().favorites.len(), 2);
    }

    #[test]
    fn test_edit_and_remove_unknown_id_leave_document_alone() {
        let mut store = sample_store();
        let unknown = RecordId::new("missing");

        assert!(!store.edit_favorite(&unknown, FavoriteFields::new("X", MealType::Dinner)));
        assert!(!store.edit_dislike(&unknown, DislikeFields::new("X", Severity::Mild)));
        assert!(!store.edit_allergy(&unknown, AllergyFields::new("X", Severity::Mild)));
        assert!(!store.remove_favorite(&unknown));
        assert!(!store.remove_dislike(&unknown));
        assert!(!store.remove_allergy(&unknown));

        assert_eq!(store.document(), &PreferencesDocument::sample());
        assert_eq!(store.revision(), 0);

        // The attempts are still logged
        let actions: Vec<_> = store
            .change_log()
            .entries()
            .iter()
            .map(|e| e.change.action())
            .collect();
        assert_eq!(
            actions,
            vec![
                "Edit Favorite Food",
                "Edit Disliked Food",
                "Edit Allergy",
                "Remove Favorite Food",
                "Remove Disliked Food",
                "Remove Allergy",
            ]
        );
    }

    #[test]
    fn test_unknown_allergy_remove_then_edit_logs_both() {
        let mut store = sample_store();
        let unknown = RecordId::new("nope");

        assert!(!store.remove_allergy(&unknown));
        assert!(!store.edit_allergy(&unknown, AllergyFields::new("Gluten", Severity::Mild)));

        assert_eq!(store.change_log().len(), 2);
        assert_eq!(
            store.change_log().entries()[0].change,
            Change::RemoveAllergy {
                id: unknown.clone()
            }
        );
        match &store.change_log().entries()[1].change {
            Change::EditAllergy { id, fields } => {
                assert_eq!(id, &unknown);
                assert_eq!(fields.name, "Gluten");
            }
            other => panic!("unexpected change: {:?}", other),
        }
    }

    #[test]
    fn test_blank_edit_of_unknown_id_is_not_logged() {
        let mut store = sample_store();
        assert!(!store.edit_dislike(&RecordId::new("nope"), DislikeFields::new(" ", Severity::Mild)));
        assert!(store.change_log().is_empty());
    }

    #[test]
    fn test_revision_counts_applied_mutations_only() {
        let mut store = sample_store();
        let id = store
            .add_favorite(FavoriteFields::new("Yogurt", MealType::Snacks))
            .unwrap();
        assert_eq!(store.revision(), 1);

        store.add_favorite(FavoriteFields::new("", MealType::Snacks));
        store.set_instructions("a".repeat(501));
        store.remove_favorite(&RecordId::new("missing"));
        assert_eq!(store.revision(), 1);

        assert!(store.remove_favorite(&id));
        assert_eq!(store.revision(), 2);

        store.clear_change_log();
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_edit_allergy_preserves_id_and_position() {
        let mut store = sample_store();
        store.add_allergy(AllergyFields::new("Gluten", Severity::Moderate));
        let gluten_before = store.document().allergies[1].clone();
        let tree_nuts = store.document().allergies[0].id.clone();

        assert!(store.edit_allergy(
            &tree_nuts,
            AllergyFields::new("Tree nuts", Severity::Moderate).with_reaction("Noticeable reaction"),
        ));

        let allergies = &store.document().allergies;
        assert_eq!(allergies.len(), 2);
        assert_eq!(allergies[0].id, tree_nuts);
        assert_eq!(allergies[0].name, "Tree nuts");
        assert_eq!(allergies[0].severity, Severity::Moderate);
        assert_eq!(allergies[1], gluten_before);
    }

    #[test]
    fn test_edit_rejects_blank_name() {
        let mut store = sample_store();
        let id = store.document().favorites[0].id.clone();
        assert!(!store.edit_favorite(&id, FavoriteFields::new("  ", MealType::Dinner)));
        assert_eq!(store.document().favorites[0].name, "Oatmeal with berries");
        assert_eq!(store.document().favorites[0].meal_type, MealType::Breakfast);
    }

    #[test]
    fn test_edit_dislike_replaces_reason() {
        let mut store = sample_store();
        let id = store.document().dislikes[0].id.clone();
        assert!(store.edit_dislike(&id, DislikeFields::new("Spicy foods", Severity::Mild)));

        let food = &store.document().dislikes[0];
        assert_eq!(food.severity, Severity::Mild);
        assert!(food.reason.is_none());
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut store = PreferenceStore::default();
        let a = store.add_favorite(FavoriteFields::new("A", MealType::Lunch)).unwrap();
        let b = store.add_favorite(FavoriteFields::new("B", MealType::Lunch)).unwrap();
        let c = store.add_favorite(FavoriteFields::new("C", MealType::Lunch)).unwrap();

        assert!(store.remove_favorite(&b));
        let ids: Vec<_> = store.document().favorites.iter().map(|f| f.id.clone()).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_double_remove_is_idempotent() {
        let mut store = sample_store();
        let id = store.document().dislikes[0].id.clone();

        assert!(store.remove_dislike(&id));
        let after_first = store.document().clone();
        assert!(!store.remove_dislike(&id));
        assert_eq!(store.document(), &after_first);
        assert_eq!(store.revision(), 1);
        assert_eq!(store.change_log().len(), 2);
    }

    #[test]
    fn test_set_instructions_within_limit() {
        let mut store = sample_store();
        assert!(store.set_instructions("Prefers warm meals"));
        assert_eq!(store.document().special_instructions, "Prefers warm meals");
        assert_eq!(store.overview().has_instructions, 1);

        assert!(store.set_instructions("a".repeat(500)));
        assert!(store.instructions_field().is_at_limit());
    }

    #[test]
    fn test_set_instructions_over_limit_is_rejected() {
        let mut store = sample_store();
        store.set_instructions("Soft foods");

        assert!(!store.set_instructions("a".repeat(501)));
        assert_eq!(store.document().special_instructions, "Soft foods");

        let field = store.instructions_field();
        assert_eq!(field.remaining(), 490);
        assert!(!field.is_at_limit());
    }

    #[test]
    fn test_clearing_instructions() {
        let mut store = sample_store();
        store.set_instructions("Soft foods");
        assert!(store.set_instructions(""));
        assert_eq!(store.overview().has_instructions, 0);
    }

    #[test]
    fn test_snapshot_is_not_affected_by_later_changes() {
        let mut store = sample_store();
        let snapshot = store.snapshot();

        store.add_favorite(FavoriteFields::new("Yogurt", MealType::Snacks));
        store.set_instructions("Warm meals");

        assert_eq!(snapshot.favorites.len(), 1);
        assert!(snapshot.special_instructions.is_empty());
        assert_eq!(store.document().favorites.len(), 2);
    }

    #[test]
    fn test_change_log_records_each_mutation() {
        let mut store = sample_store();
        let id = store
            .add_favorite(FavoriteFields::new("Yogurt", MealType::Snacks))
            .unwrap();
        store.edit_favorite(&id, FavoriteFields::new("Greek yogurt", MealType::Snacks));
        store.remove_favorite(&id);
        store.set_instructions("Small portions");

        let actions: Vec<_> = store
            .change_log()
            .entries()
            .iter()
            .map(|e| e.change.action())
            .collect();
        assert_eq!(
            actions,
            vec![
                "Add Favorite Food",
                "Edit Favorite Food",
                "Remove Favorite Food",
                "Update Special Instructions",
            ]
        );

        match &store.change_log().entries()[1].change {
            Change::EditFavorite { id: edited, fields } => {
                assert_eq!(edited, &id);
                assert_eq!(fields.name, "Greek yogurt");
            }
            other => panic!("unexpected change: {:?}", other),
        }
    }

    #[test]
    fn test_fresh_id_skips_ids_from_loaded_document() {
        let mut ids = IdGenerator::new();
        let taken = ids.next_id();
        let existing = vec![FavoriteFood::new(taken.clone(), "Toast", MealType::Breakfast)];

        let mut replay = IdGenerator::new();
        let id = PreferenceStore::fresh_id(&mut replay, &existing);
        assert_ne!(id, taken);
    }
}
