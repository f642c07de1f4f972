//! Summary counters derived from a document.

use serde::Serialize;
use std::fmt;

use crate::models::PreferencesDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub favorites_count: usize,
    pub dislikes_count: usize,
    pub allergies_count: usize,
    /// 1 when special instructions are present, otherwise 0.
    pub has_instructions: usize,
}

impl Overview {
    pub fn of(doc: &PreferencesDocument) -> Self {
        Self {
            favorites_count: doc.favorites.len(),
            dislikes_count: doc.dislikes.len(),
            allergies_count: doc.allergies.len(),
            has_instructions: usize::from(!doc.special_instructions.is_empty()),
        }
    }

    /// `(count, label, sublabel)` per summary card.
    pub fn cards(&self) -> [(usize, &'static str, &'static str); 4] {
        [
            (self.favorites_count, "Favorites", "Liked items"),
            (self.dislikes_count, "Avoid", "Disliked items"),
            (self.allergies_count, "Allergies", "allergies listed"),
            (self.has_instructions, "Notes", "special instructions"),
        ]
    }
}

impl From<&PreferencesDocument> for Overview {
    fn from(doc: &PreferencesDocument) -> Self {
        Self::of(doc)
    }
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (count, label, sublabel) in self.cards() {
            writeln!(f, "{:>4}  {:<10} {}", count, label, sublabel)?;
        }
        Ok(())
    }
}
