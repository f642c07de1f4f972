use clap::{Args, Subcommand};
use mealprefs::{Collection, FavoriteFields, MealType, PreferenceStore, RecordId};

use super::{print_suggestions, OutputFormat};

#[derive(Args)]
pub struct FavoriteCommand {
    #[command(subcommand)]
    pub command: FavoriteSubcommand,
}

#[derive(Subcommand)]
pub enum FavoriteSubcommand {
    /// Add a favorite food
    Add {
        /// Name of the food
        name: String,

        /// Meal type (breakfast, lunch, dinner, snacks)
        #[arg(long, short, default_value = "breakfast")]
        meal: MealType,
    },

    /// Add a favorite from the suggestion list
    Quick {
        /// Suggested food name
        suggestion: String,

        /// Meal type (breakfast, lunch, dinner, snacks)
        #[arg(long, short, default_value = "breakfast")]
        meal: MealType,
    },

    /// Change a favorite food
    Edit {
        /// Favorite food ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New meal type
        #[arg(long, short)]
        meal: Option<MealType>,
    },

    /// Remove a favorite food
    Remove {
        /// Favorite food ID
        id: String,
    },

    /// List favorite foods grouped by meal
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show quick-add suggestions
    Suggestions,
}

impl FavoriteCommand {
    pub fn is_write(&self) -> bool {
        matches!(
            self.command,
            FavoriteSubcommand::Add { .. }
                | FavoriteSubcommand::Quick { .. }
                | FavoriteSubcommand::Edit { .. }
                | FavoriteSubcommand::Remove { .. }
        )
    }

    pub fn run(&self, store: &mut PreferenceStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FavoriteSubcommand::Add { name, meal } => {
                if name.trim().is_empty() {
                    return Err("Food name cannot be empty".into());
                }
                add(store, name, *meal)
            }

            FavoriteSubcommand::Quick { suggestion, meal } => {
                let name = Collection::Favorites
                    .find(suggestion)
                    .ok_or_else(|| format!("Not a suggested favorite: {}", suggestion))?;
                if Collection::Favorites.contains_name(store.document(), name) {
                    return Err(format!("'{}' is already a favorite", name).into());
                }
                add(store, name, *meal)
            }

            FavoriteSubcommand::Edit { id, name, meal } => {
                if name.is_none() && meal.is_none() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let id = RecordId::from(id.as_str());
                let food = store
                    .document()
                    .find_favorite(&id)
                    .ok_or_else(|| format!("Favorite food not found: {}", id))?;

                let fields = FavoriteFields::new(
                    name.clone().unwrap_or_else(|| food.name.clone()),
                    meal.unwrap_or(food.meal_type),
                );
                if fields.name.trim().is_empty() {
                    return Err("Food name cannot be empty".into());
                }

                if !store.edit_favorite(&id, fields) {
                    return Err(format!("Could not update favorite food {}", id).into());
                }
                if let Some(food) = store.document().find_favorite(&id) {
                    println!("Updated favorite food: {}", food);
                }
                Ok(())
            }

            FavoriteSubcommand::Remove { id } => {
                let id = RecordId::from(id.as_str());
                let name = store
                    .document()
                    .find_favorite(&id)
                    .map(|f| f.name.clone())
                    .ok_or_else(|| format!("Favorite food not found: {}", id))?;

                store.remove_favorite(&id);
                println!("Removed favorite food: {}", name);
                Ok(())
            }

            FavoriteSubcommand::List { format } => {
                let favorites = &store.document().favorites;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(favorites)?);
                    }
                    OutputFormat::Text => {
                        if favorites.is_empty() {
                            println!("No favorite foods added yet");
                            return Ok(());
                        }
                        for meal_type in MealType::ALL {
                            let foods: Vec<_> = store.document().favorites_for(meal_type).collect();
                            println!("{} ({})", meal_type.label(), foods.len());
                            for food in foods {
                                println!("  {:<24}  {}", food.id, food.name);
                            }
                        }
                        println!("\nTotal: {} favorite(s)", favorites.len());
                    }
                }
                Ok(())
            }

            FavoriteSubcommand::Suggestions => {
                print_suggestions(Collection::Favorites, store.document());
                Ok(())
            }
        }
    }
}

fn add(
    store: &mut PreferenceStore,
    name: &str,
    meal: MealType,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = store
        .add_favorite(FavoriteFields::new(name, meal))
        .ok_or("Food name cannot be empty")?;
    println!("Added favorite food: {} ({})  [{}]", name.trim(), meal, id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealprefs::PreferencesDocument;

    fn run(store: &mut PreferenceStore, command: FavoriteSubcommand) -> Result<(), String> {
        FavoriteCommand { command }
            .run(store)
            .map_err(|e| e.to_string())
    }

    fn sample_store() -> PreferenceStore {
        PreferenceStore::new(PreferencesDocument::sample())
    }

    #[test]
    fn test_add_favorite() {
        let mut store = PreferenceStore::default();
        run(
            &mut store,
            FavoriteSubcommand::Add {
                name: " Toast ".into(),
                meal: MealType::Breakfast,
            },
        )
        .unwrap();

        let food = &store.document().favorites[0];
        assert_eq!(food.name, "Toast");
        assert_eq!(food.meal_type, MealType::Breakfast);
    }

    #[test]
    fn test_quick_add_then_refuse_duplicate() {
        let mut store = sample_store();
        let quick = || FavoriteSubcommand::Quick {
            suggestion: "yogurt".into(),
            meal: MealType::Snacks,
        };
        run(&mut store, quick()).unwrap();

        let added = store.document().favorites.last().unwrap();
        assert_eq!(added.name, "Yogurt");
        assert_eq!(added.meal_type, MealType::Snacks);

        let err = run(&mut store, quick()).unwrap_err();
        assert_eq!(err, "'Yogurt' is already a favorite");
        assert_eq!(store.document().favorites.len(), 2);
    }

    #[test]
    fn test_quick_add_rejects_unknown_suggestion() {
        let mut store = sample_store();
        let err = run(
            &mut store,
            FavoriteSubcommand::Quick {
                suggestion: "Pizza".into(),
                meal: MealType::Dinner,
            },
        )
        .unwrap_err();
        assert_eq!(err, "Not a suggested favorite: Pizza");
    }

    #[test]
    fn test_edit_keeps_unspecified_name() {
        let mut store = sample_store();
        let id = store.document().favorites[0].id.to_string();
        run(
            &mut store,
            FavoriteSubcommand::Edit {
                id,
                name: None,
                meal: Some(MealType::Lunch),
            },
        )
        .unwrap();

        let food = &store.document().favorites[0];
        assert_eq!(food.name, "Oatmeal with berries");
        assert_eq!(food.meal_type, MealType::Lunch);
    }

    #[test]
    fn test_edit_without_options_is_an_error() {
        let mut store = sample_store();
        let id = store.document().favorites[0].id.to_string();
        let err = run(
            &mut store,
            FavoriteSubcommand::Edit {
                id,
                name: None,
                meal: None,
            },
        )
        .unwrap_err();
        assert!(err.starts_with("Nothing to update"));
        assert!(store.change_log().is_empty());
    }

    #[test]
    fn test_edit_unknown_id_is_an_error() {
        let mut store = sample_store();
        let err = run(
            &mut store,
            FavoriteSubcommand::Edit {
                id: "missing".into(),
                name: Some("Toast".into()),
                meal: None,
            },
        )
        .unwrap_err();
        assert_eq!(err, "Favorite food not found: missing");
    }

    #[test]
    fn test_remove_favorite() {
        let mut store = sample_store();
        let id = store.document().favorites[0].id.to_string();
        run(&mut store, FavoriteSubcommand::Remove { id }).unwrap();
        assert!(store.document().favorites.is_empty());
        assert_eq!(store.revision(), 1);
    }
}
