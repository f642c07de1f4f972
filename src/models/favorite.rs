use serde::{Deserialize, Serialize};
use std::fmt;

use super::meal_type::MealType;
use super::record_id::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteFood {
    pub id: RecordId,
    pub name: String,
    pub meal_type: MealType,
}

impl FavoriteFood {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, meal_type: MealType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            meal_type,
        }
    }
}

impl fmt::Display for FavoriteFood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.meal_type)
    }
}

/// Editable fields of a favorite food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteFields {
    pub name: String,
    pub meal_type: MealType,
}

impl FavoriteFields {
    pub fn new(name: impl Into<String>, meal_type: MealType) -> Self {
        Self {
            name: name.into(),
            meal_type,
        }
    }
}
