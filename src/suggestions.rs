//! Quick-add suggestions.
//!
//! Each collection has a short list of common entries. A suggestion is only
//! offered while no record with exactly that name exists. The store itself
//! does not enforce this; it is a front-end convenience.

use crate::models::PreferencesDocument;

pub const FAVORITE_SUGGESTIONS: [&str; 5] = [
    "Oatmeal",
    "Scrambled Eggs",
    "Chicken Soup",
    "Fruit Salad",
    "Yogurt",
];

pub const DISLIKE_SUGGESTIONS: [&str; 5] = [
    "Spicy Foods",
    "Raw Vegetables",
    "Liver",
    "Brussels Sprouts",
    "Strong Cheese",
];

pub const ALLERGY_SUGGESTIONS: [&str; 6] = [
    "Tree nuts",
    "Dairy/Milk",
    "Gluten",
    "Shellfish",
    "Eggs",
    "Lactose",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Favorites,
    Dislikes,
    Allergies,
}

impl Collection {
    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            Collection::Favorites => &FAVORITE_SUGGESTIONS,
            Collection::Dislikes => &DISLIKE_SUGGESTIONS,
            Collection::Allergies => &ALLERGY_SUGGESTIONS,
        }
    }

    /// Whether a record with exactly this name is already present.
    pub fn contains_name(&self, doc: &PreferencesDocument, name: &str) -> bool {
        match self {
            Collection::Favorites => doc.favorites.iter().any(|f| f.name == name),
            Collection::Dislikes => doc.dislikes.iter().any(|d| d.name == name),
            Collection::Allergies => doc.allergies.iter().any(|a| a.name == name),
        }
    }

    /// Each suggestion paired with whether it can still be added.
    pub fn availability(&self, doc: &PreferencesDocument) -> Vec<(&'static str, bool)> {
        self.suggestions()
            .iter()
            .map(|s| (*s, !self.contains_name(doc, s)))
            .collect()
    }

    /// Looks up a suggestion case-insensitively, returning its canonical spelling.
    pub fn find(&self, name: &str) -> Option<&'static str> {
        let wanted = name.trim().to_lowercase();
        self.suggestions()
            .iter()
            .copied()
            .find(|s| s.to_lowercase() == wanted)
    }
}
