mod allergy;
mod config_cmd;
mod dislike;
mod favorite;
mod instructions;
mod shell;

pub use allergy::AllergyCommand;
pub use config_cmd::ConfigCommand;
pub use dislike::DislikeCommand;
pub use favorite::FavoriteCommand;
pub use instructions::InstructionsCommand;
pub use shell::ShellCommand;

use clap::{Subcommand, ValueEnum};
use mealprefs::{Collection, PreferencesDocument};

use crate::config::Config;
use crate::session::Session;

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Commands that read or change the preferences document. Shared by the
/// one-shot CLI and the interactive shell.
#[derive(Subcommand)]
pub enum PreferencesCommand {
    /// Manage favorite foods
    Favorite(FavoriteCommand),

    /// Manage foods to avoid
    Dislike(DislikeCommand),

    /// Manage allergies and intolerances
    Allergy(AllergyCommand),

    /// Manage special instructions
    Instructions(InstructionsCommand),

    /// Show all meal preferences
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the summary counters
    Summary {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl PreferencesCommand {
    /// Returns true if the command is meant to change the document.
    pub fn is_write(&self) -> bool {
        match self {
            PreferencesCommand::Favorite(cmd) => cmd.is_write(),
            PreferencesCommand::Dislike(cmd) => cmd.is_write(),
            PreferencesCommand::Allergy(cmd) => cmd.is_write(),
            PreferencesCommand::Instructions(cmd) => cmd.is_write(),
            PreferencesCommand::Show { .. } | PreferencesCommand::Summary { .. } => false,
        }
    }

    pub fn run(
        &self,
        session: &mut Session,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            PreferencesCommand::Favorite(cmd) => cmd.run(&mut session.store),
            PreferencesCommand::Dislike(cmd) => cmd.run(&mut session.store),
            PreferencesCommand::Allergy(cmd) => cmd.run(&mut session.store),
            PreferencesCommand::Instructions(cmd) => cmd.run(&mut session.store),

            PreferencesCommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(session.store.document())?);
                    }
                    OutputFormat::Text => {
                        print_header(session, config);
                        println!("{}", session.store.overview());
                        print!("{}", session.store.document());
                    }
                }
                Ok(())
            }

            PreferencesCommand::Summary { format } => {
                let overview = session.store.overview();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&overview)?);
                    }
                    OutputFormat::Text => {
                        print!("{}", overview);
                    }
                }
                Ok(())
            }
        }
    }
}

fn print_header(session: &Session, config: &Config) {
    let name = config
        .resident
        .name
        .as_deref()
        .unwrap_or("Meal Preferences");
    println!("{}", name);
    println!("{}", "=".repeat(name.chars().count()));

    let mut details = Vec::new();
    if let Some(room) = &config.resident.room {
        details.push(format!("Room {}", room));
    }
    match session.updated_at {
        Some(at) => details.push(format!(
            "Updated on {}",
            at.with_timezone(&chrono::Local).format("%B %-d, %Y")
        )),
        None => details.push("Not saved yet".to_string()),
    }
    println!("{}\n", details.join(" • "));
}

fn print_suggestions(collection: Collection, doc: &PreferencesDocument) {
    for (name, available) in collection.availability(doc) {
        if available {
            println!("  + {}", name);
        } else {
            println!("  ✓ {} (already added)", name);
        }
    }
}
