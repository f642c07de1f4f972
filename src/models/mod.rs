mod allergy;
mod dislike;
mod document;
mod favorite;
mod meal_type;
mod record_id;
mod severity;

pub use allergy::{Allergy, AllergyFields};
pub use dislike::{DislikeFields, DislikedFood};
pub use document::{DocumentError, PreferencesDocument, Seed, INSTRUCTIONS_MAX_CHARS};
pub use favorite::{FavoriteFields, FavoriteFood};
pub use meal_type::MealType;
pub use record_id::{IdGenerator, RecordId};
pub use severity::Severity;
