//! Session change log.
//!
//! Every mutation the store applies is appended here and mirrored to
//! `tracing`, as are edits and removals aimed at an unknown id. The log is diagnostic only and never feeds back into state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{
    Allergy, AllergyFields, DislikeFields, DislikedFood, FavoriteFields, FavoriteFood, RecordId,
};

/// A requested mutation, keyed by action name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "payload")]
pub enum Change {
    #[serde(rename = "Add Favorite Food")]
    AddFavorite(FavoriteFood),
    #[serde(rename = "Edit Favorite Food")]
    EditFavorite {
        id: RecordId,
        #[serde(flatten)]
        fields: FavoriteFields,
    },
    #[serde(rename = "Remove Favorite Food")]
    RemoveFavorite { id: RecordId },

    #[serde(rename = "Add Disliked Food")]
    AddDislike(DislikedFood),
    #[serde(rename = "Edit Disliked Food")]
    EditDislike {
        id: RecordId,
        #[serde(flatten)]
        fields: DislikeFields,
    },
    #[serde(rename = "Remove Disliked Food")]
    RemoveDislike { id: RecordId },

    #[serde(rename = "Add Allergy")]
    AddAllergy(Allergy),
    #[serde(rename = "Edit Allergy")]
    EditAllergy {
        id: RecordId,
        #[serde(flatten)]
        fields: AllergyFields,
    },
    #[serde(rename = "Remove Allergy")]
    RemoveAllergy { id: RecordId },

    #[serde(rename = "Update Special Instructions")]
    UpdateInstructions { text: String },
}

impl Change {
    pub fn action(&self) -> &'static str {
        match self {
            Change::AddFavorite(_) => "Add Favorite Food",
            Change::EditFavorite { .. } => "Edit Favorite Food",
            Change::RemoveFavorite { .. } => "Remove Favorite Food",
            Change::AddDislike(_) => "Add Disliked Food",
            Change::EditDislike { .. } => "Edit Disliked Food",
            Change::RemoveDislike { .. } => "Remove Disliked Food",
            Change::AddAllergy(_) => "Add Allergy",
            Change::EditAllergy { .. } => "Edit Allergy",
            Change::RemoveAllergy { .. } => "Remove Allergy",
            Change::UpdateInstructions { .. } => "Update Special Instructions",
        }
    }

    /// The payload alone, as JSON.
    pub fn payload(&self) -> serde_json::Value {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.remove("payload").unwrap_or(serde_json::Value::Null)
            }
            _ => serde_json::Value::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeEntry {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub change: Change,
}

#[derive(Debug, Default)]
pub struct ChangeLog {
    entries: Vec<ChangeEntry>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, change: Change) {
        tracing::info!(
            target: "meal_preferences",
            action = change.action(),
            payload = %change.payload(),
            "{}",
            change.action()
        );
        self.entries.push(ChangeEntry {
            at: Utc::now(),
            change,
        });
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealType, Severity};

    #[test]
    fn test_record_appends_in_order() {
        let mut log = ChangeLog::new();
        log.record(Change::RemoveFavorite {
            id: RecordId::new("1"),
        });
        log.record(Change::UpdateInstructions {
            text: "Warm meals".into(),
        });

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].change.action(), "Remove Favorite Food");
        assert_eq!(
            log.entries()[1].change.action(),
            "Update Special Instructions"
        );
    }

    #[test]
    fn test_serializes_as_tagged_action() {
        let change = Change::EditAllergy {
            id: RecordId::new("3"),
            fields: AllergyFields::new("Gluten", Severity::Mild),
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["action"], "Edit Allergy");
        assert_eq!(json["payload"]["id"], "3");
        assert_eq!(json["payload"]["severity"], "mild");
    }

    #[test]
    fn test_payload_of_add() {
        let change = Change::AddFavorite(FavoriteFood::new("9", "Yogurt", MealType::Snacks));
        let payload = change.payload();
        assert_eq!(payload["name"], "Yogurt");
        assert_eq!(payload["meal_type"], "snacks");
    }

    #[test]
    fn test_clear() {
        let mut log = ChangeLog::new();
        log.record(Change::RemoveAllergy {
            id: RecordId::new("1"),
        });
        log.clear();
        assert!(log.is_empty());
    }
}
