//! The preferences document.
//!
//! A resident has exactly one document: three ordered collections and a
//! free-text instructions field. Collections keep insertion order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::allergy::Allergy;
use super::dislike::DislikedFood;
use super::favorite::FavoriteFood;
use super::meal_type::MealType;
use super::record_id::RecordId;
use super::severity::Severity;

/// Maximum length of the special instructions, in characters.
pub const INSTRUCTIONS_MAX_CHARS: usize = 500;

/// Reasons a document read from outside the store is rejected.
#[derive(Error, Debug, PartialEq)]
pub enum DocumentError {
    #[error("Duplicate {collection} id: {id}")]
    DuplicateId {
        collection: &'static str,
        id: RecordId,
    },

    #[error("Blank name in {collection} (id {id})")]
    BlankName {
        collection: &'static str,
        id: RecordId,
    },

    #[error("Special instructions are {0} characters long (limit is 500)")]
    InstructionsTooLong(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesDocument {
    #[serde(default)]
    pub favorites: Vec<FavoriteFood>,
    #[serde(default)]
    pub dislikes: Vec<DislikedFood>,
    #[serde(default)]
    pub allergies: Vec<Allergy>,
    #[serde(default)]
    pub special_instructions: String,
}

impl PreferencesDocument {
    /// Starter document with one entry per collection.
    pub fn sample() -> Self {
        Self {
            favorites: vec![FavoriteFood::new(
                "1",
                "Oatmeal with berries",
                MealType::Breakfast,
            )],
            dislikes: vec![DislikedFood::new("1", "Spicy foods", Severity::Severe)
                .with_reason("Causes digestive discomfort")],
            allergies: vec![
                Allergy::new("1", "Tree nuts", Severity::Severe).with_reaction("Anaphylaxis risk")
            ],
            special_instructions: String::new(),
        }
    }

    /// Favorites for one meal, in insertion order.
    pub fn favorites_for(&self, meal_type: MealType) -> impl Iterator<Item = &FavoriteFood> {
        self.favorites
            .iter()
            .filter(move |f| f.meal_type == meal_type)
    }

    pub fn find_favorite(&self, id: &RecordId) -> Option<&FavoriteFood> {
        self.favorites.iter().find(|f| &f.id == id)
    }

    pub fn find_dislike(&self, id: &RecordId) -> Option<&DislikedFood> {
        self.dislikes.iter().find(|d| &d.id == id)
    }

    pub fn find_allergy(&self, id: &RecordId) -> Option<&Allergy> {
        self.allergies.iter().find(|a| &a.id == id)
    }

    /// Checks the invariants the store maintains.
    ///
    /// Only needed for documents that did not come from a store, e.g. ones
    /// read from disk.
    pub fn validate(&self) -> Result<(), DocumentError> {
        check_collection(
            "favorites",
            self.favorites.iter().map(|f| (&f.id, f.name.as_str())),
        )?;
        check_collection(
            "dislikes",
            self.dislikes.iter().map(|d| (&d.id, d.name.as_str())),
        )?;
        check_collection(
            "allergies",
            self.allergies.iter().map(|a| (&a.id, a.name.as_str())),
        )?;

        let len = self.special_instructions.chars().count();
        if len > INSTRUCTIONS_MAX_CHARS {
            return Err(DocumentError::InstructionsTooLong(len));
        }
        Ok(())
    }
}

fn check_collection<'a>(
    collection: &'static str,
    records: impl Iterator<Item = (&'a RecordId, &'a str)>,
) -> Result<(), DocumentError> {
    let mut seen = HashSet::new();
    for (id, name) in records {
        if name.trim().is_empty() {
            return Err(DocumentError::BlankName {
                collection,
                id: id.clone(),
            });
        }
        if !seen.insert(id) {
            return Err(DocumentError::DuplicateId {
                collection,
                id: id.clone(),
            });
        }
    }
    Ok(())
}

impl fmt::Display for PreferencesDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Favorite Foods")?;
        writeln!(f, "{}", "=".repeat(14))?;
        if self.favorites.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for meal_type in MealType::ALL {
            let foods: Vec<_> = self.favorites_for(meal_type).collect();
            if foods.is_empty() {
                continue;
            }
            writeln!(f, "{}:", meal_type.label())?;
            for food in foods {
                writeln!(f, "  - {}  [{}]", food.name, food.id)?;
            }
        }

        writeln!(f, "\nFoods to Avoid")?;
        writeln!(f, "{}", "=".repeat(14))?;
        if self.dislikes.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for food in &self.dislikes {
            writeln!(f, "  - {}  [{}]", food, food.id)?;
        }

        writeln!(f, "\nAllergies")?;
        writeln!(f, "{}", "=".repeat(9))?;
        if self.allergies.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for allergy in &self.allergies {
            writeln!(f, "  - {}  [{}]", allergy, allergy.id)?;
        }

        writeln!(f, "\nSpecial Instructions")?;
        writeln!(f, "{}", "=".repeat(20))?;
        if self.special_instructions.is_empty() {
            writeln!(f, "  (none)")?;
        } else {
            writeln!(f, "{}", self.special_instructions)?;
        }

        Ok(())
    }
}

/// Document a session starts from when nothing is stored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seed {
    #[default]
    Empty,
    Sample,
}

impl Seed {
    pub fn document(&self) -> PreferencesDocument {
        match self {
            Seed::Empty => PreferencesDocument::default(),
            Seed::Sample => PreferencesDocument::sample(),
        }
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Empty => write!(f, "empty"),
            Seed::Sample => write!(f, "sample"),
        }
    }
}

impl FromStr for Seed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "empty" => Ok(Seed::Empty),
            "sample" => Ok(Seed::Sample),
            _ => Err(format!("Invalid seed '{}'. Valid options: empty, sample", s)),
        }
    }
}
