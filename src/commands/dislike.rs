use clap::{Args, Subcommand};
use mealprefs::{Collection, DislikeFields, PreferenceStore, RecordId, Severity};

use super::{print_suggestions, OutputFormat};

#[derive(Args)]
pub struct DislikeCommand {
    #[command(subcommand)]
    pub command: DislikeSubcommand,
}

#[derive(Subcommand)]
pub enum DislikeSubcommand {
    /// Add a food to avoid
    Add {
        /// Name of the food
        name: String,

        /// Severity (mild, moderate, severe)
        #[arg(long, short, default_value = "mild")]
        severity: Severity,

        /// Why the food should be avoided
        #[arg(long)]
        reason: Option<String>,
    },

    /// Add a food to avoid from the suggestion list
    Quick {
        /// Suggested food name
        suggestion: String,

        /// Severity (mild, moderate, severe)
        #[arg(long, short, default_value = "mild")]
        severity: Severity,
    },

    /// Change a disliked food
    Edit {
        /// Disliked food ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New severity
        #[arg(long, short)]
        severity: Option<Severity>,

        /// New reason
        #[arg(long, conflicts_with = "clear_reason")]
        reason: Option<String>,

        /// Remove the reason
        #[arg(long)]
        clear_reason: bool,
    },

    /// Remove a disliked food
    Remove {
        /// Disliked food ID
        id: String,
    },

    /// List foods to avoid
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show quick-add suggestions
    Suggestions,
}

impl DislikeCommand {
    pub fn is_write(&self) -> bool {
        matches!(
            self.command,
            DislikeSubcommand::Add { .. }
                | DislikeSubcommand::Quick { .. }
                | DislikeSubcommand::Edit { .. }
                | DislikeSubcommand::Remove { .. }
        )
    }

    pub fn run(&self, store: &mut PreferenceStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            DislikeSubcommand::Add {
                name,
                severity,
                reason,
            } => {
                if name.trim().is_empty() {
                    return Err("Food name cannot be empty".into());
                }
                let mut fields = DislikeFields::new(name.as_str(), *severity);
                fields.reason = reason.clone();
                add(store, fields)
            }

            DislikeSubcommand::Quick {
                suggestion,
                severity,
            } => {
                let name = Collection::Dislikes
                    .find(suggestion)
                    .ok_or_else(|| format!("Not a suggested food to avoid: {}", suggestion))?;
                if Collection::Dislikes.contains_name(store.document(), name) {
                    return Err(format!("'{}' is already on the avoid list", name).into());
                }
                add(store, DislikeFields::new(name, *severity))
            }

            DislikeSubcommand::Edit {
                id,
                name,
                severity,
                reason,
                clear_reason,
            } => {
                if name.is_none() && severity.is_none() && reason.is_none() && !clear_reason {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let id = RecordId::from(id.as_str());
                let food = store
                    .document()
                    .find_dislike(&id)
                    .ok_or_else(|| format!("Disliked food not found: {}", id))?;

                let fields = DislikeFields {
                    name: name.clone().unwrap_or_else(|| food.name.clone()),
                    severity: severity.unwrap_or(food.severity),
                    reason: if *clear_reason {
                        None
                    } else {
                        reason.clone().or_else(|| food.reason.clone())
                    },
                };
                if fields.name.trim().is_empty() {
                    return Err("Food name cannot be empty".into());
                }

                if !store.edit_dislike(&id, fields) {
                    return Err(format!("Could not update disliked food {}", id).into());
                }
                if let Some(food) = store.document().find_dislike(&id) {
                    println!("Updated disliked food: {}", food);
                }
                Ok(())
            }

            DislikeSubcommand::Remove { id } => {
                let id = RecordId::from(id.as_str());
                let name = store
                    .document()
                    .find_dislike(&id)
                    .map(|d| d.name.clone())
                    .ok_or_else(|| format!("Disliked food not found: {}", id))?;

                store.remove_dislike(&id);
                println!("Removed disliked food: {}", name);
                Ok(())
            }

            DislikeSubcommand::List { format } => {
                let dislikes = &store.document().dislikes;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(dislikes)?);
                    }
                    OutputFormat::Text => {
                        if dislikes.is_empty() {
                            println!("No foods to avoid");
                            return Ok(());
                        }
                        println!("{:<24}  {:<24}  {:<15}  REASON", "ID", "NAME", "SEVERITY");
                        println!("{}", "-".repeat(80));
                        for food in dislikes {
                            println!(
                                "{:<24}  {:<24}  {:<15}  {}",
                                food.id,
                                food.name,
                                food.severity.dislike_label(),
                                food.reason.as_deref().unwrap_or("")
                            );
                        }
                        println!("\nTotal: {} food(s) to avoid", dislikes.len());
                    }
                }
                Ok(())
            }

            DislikeSubcommand::Suggestions => {
                print_suggestions(Collection::Dislikes, store.document());
                println!("\nSeverity:");
                for severity in Severity::ALL {
                    println!(
                        "  {:<10}  {:<15}  {}",
                        severity,
                        severity.dislike_label(),
                        severity.dislike_description()
                    );
                }
                Ok(())
            }
        }
    }
}

fn add(
    store: &mut PreferenceStore,
    fields: DislikeFields,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = store
        .add_dislike(fields)
        .ok_or("Food name cannot be empty")?;
    if let Some(food) = store.document().find_dislike(&id) {
        println!("Added food to avoid: {}  [{}]", food, id);
    }
    Ok(())
}
