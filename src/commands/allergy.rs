use clap::{Args, Subcommand};
use mealprefs::{AllergyFields, Collection, PreferenceStore, RecordId, Severity};

use super::{print_suggestions, OutputFormat};

#[derive(Args)]
pub struct AllergyCommand {
    #[command(subcommand)]
    pub command: AllergySubcommand,
}

#[derive(Subcommand)]
pub enum AllergySubcommand {
    /// Add an allergy or intolerance
    Add {
        /// Name of the allergen
        name: String,

        /// Severity (mild, moderate, severe)
        #[arg(long, short, default_value = "moderate")]
        severity: Severity,

        /// Reaction; defaults to the severity's description
        #[arg(long)]
        reaction: Option<String>,
    },

    /// Add an allergy from the suggestion list
    Quick {
        /// Suggested allergen
        suggestion: String,

        /// Severity (mild, moderate, severe)
        #[arg(long, short, default_value = "moderate")]
        severity: Severity,
    },

    /// Change an allergy
    Edit {
        /// Allergy ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New severity
        #[arg(long, short)]
        severity: Option<Severity>,

        /// New reaction
        #[arg(long, conflicts_with = "clear_reaction")]
        reaction: Option<String>,

        /// Remove the reaction
        #[arg(long)]
        clear_reaction: bool,
    },

    /// Remove an allergy
    Remove {
        /// Allergy ID
        id: String,
    },

    /// List allergies
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show quick-add suggestions
    Suggestions,
}

impl AllergyCommand {
    pub fn is_write(&self) -> bool {
        matches!(
            self.command,
            AllergySubcommand::Add { .. }
                | AllergySubcommand::Quick { .. }
                | AllergySubcommand::Edit { .. }
                | AllergySubcommand::Remove { .. }
        )
    }

    pub fn run(&self, store: &mut PreferenceStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            AllergySubcommand::Add {
                name,
                severity,
                reaction,
            } => {
                if name.trim().is_empty() {
                    return Err("Allergy name cannot be empty".into());
                }
                let reaction = reaction
                    .clone()
                    .unwrap_or_else(|| severity.allergy_description().to_string());
                add(
                    store,
                    AllergyFields::new(name.as_str(), *severity).with_reaction(reaction),
                )
            }

            AllergySubcommand::Quick {
                suggestion,
                severity,
            } => {
                let name = Collection::Allergies
                    .find(suggestion)
                    .ok_or_else(|| format!("Not a suggested allergy: {}", suggestion))?;
                if Collection::Allergies.contains_name(store.document(), name) {
                    return Err(format!("'{}' is already listed", name).into());
                }
                add(
                    store,
                    AllergyFields::new(name, *severity)
                        .with_reaction(severity.allergy_description()),
                )
            }

            AllergySubcommand::Edit {
                id,
                name,
                severity,
                reaction,
                clear_reaction,
            } => {
                if name.is_none() && severity.is_none() && reaction.is_none() && !clear_reaction
                {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let id = RecordId::from(id.as_str());
                let allergy = store
                    .document()
                    .find_allergy(&id)
                    .ok_or_else(|| format!("Allergy not found: {}", id))?;

                let fields = AllergyFields {
                    name: name.clone().unwrap_or_else(|| allergy.name.clone()),
                    severity: severity.unwrap_or(allergy.severity),
                    reaction: if *clear_reaction {
                        None
                    } else {
                        reaction.clone().or_else(|| allergy.reaction.clone())
                    },
                };
                if fields.name.trim().is_empty() {
                    return Err("Allergy name cannot be empty".into());
                }

                if !store.edit_allergy(&id, fields) {
                    return Err(format!("Could not update allergy {}", id).into());
                }
                if let Some(allergy) = store.document().find_allergy(&id) {
                    println!("Updated allergy: {}", allergy);
                }
                Ok(())
            }

            AllergySubcommand::Remove { id } => {
                let id = RecordId::from(id.as_str());
                let name = store
                    .document()
                    .find_allergy(&id)
                    .map(|a| a.name.clone())
                    .ok_or_else(|| format!("Allergy not found: {}", id))?;

                store.remove_allergy(&id);
                println!("Removed allergy: {}", name);
                Ok(())
            }

            AllergySubcommand::List { format } => {
                let allergies = &store.document().allergies;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(allergies)?);
                    }
                    OutputFormat::Text => {
                        if allergies.is_empty() {
                            println!("No allergies listed");
                            return Ok(());
                        }
                        println!("{:<24}  {:<20}  {:<10}  REACTION", "ID", "NAME", "SEVERITY");
                        println!("{}", "-".repeat(80));
                        for allergy in allergies {
                            println!(
                                "{:<24}  {:<20}  {:<10}  {}",
                                allergy.id,
                                allergy.name,
                                allergy.severity.allergy_label(),
                                allergy.reaction.as_deref().unwrap_or("")
                            );
                        }
                        println!("\nTotal: {} allergy(ies)", allergies.len());
                    }
                }
                Ok(())
            }

            AllergySubcommand::Suggestions => {
                print_suggestions(Collection::Allergies, store.document());
                println!("\nSeverity (default reaction):");
                for severity in Severity::ALL {
                    println!("  {:<10}  {}", severity, severity.allergy_description());
                }
                Ok(())
            }
        }
    }
}

fn add(
    store: &mut PreferenceStore,
    fields: AllergyFields,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = store
        .add_allergy(fields)
        .ok_or("Allergy name cannot be empty")?;
    if let Some(allergy) = store.document().find_allergy(&id) {
        println!("Added allergy: {}  [{}]", allergy, id);
    }
    Ok(())
}
