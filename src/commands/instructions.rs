use clap::{Args, Subcommand};
use mealprefs::{PreferenceStore, INSTRUCTIONS_MAX_CHARS};

#[derive(Args)]
pub struct InstructionsCommand {
    #[command(subcommand)]
    pub command: InstructionsSubcommand,
}

#[derive(Subcommand)]
pub enum InstructionsSubcommand {
    /// Replace the special instructions
    ///
    /// Texture preferences, temperature needs, cultural requirements,
    /// assistance needs or portion preferences.
    Set {
        /// Instruction text (at most 500 characters)
        text: String,
    },

    /// Remove the special instructions
    Clear,

    /// Show the special instructions and remaining characters
    Show,
}

impl InstructionsCommand {
    pub fn is_write(&self) -> bool {
        matches!(
            self.command,
            InstructionsSubcommand::Set { .. } | InstructionsSubcommand::Clear
        )
    }

    pub fn run(&self, store: &mut PreferenceStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            InstructionsSubcommand::Set { text } => {
                let len = text.chars().count();
                if !store.set_instructions(text.as_str()) {
                    return Err(format!(
                        "Special instructions are {} characters long; the limit is {}",
                        len, INSTRUCTIONS_MAX_CHARS
                    )
                    .into());
                }
                let field = store.instructions_field();
                println!(
                    "Updated special instructions ({}/{} characters)",
                    field.count(),
                    field.max()
                );
                Ok(())
            }

            InstructionsSubcommand::Clear => {
                if store.document().special_instructions.is_empty() {
                    println!("No special instructions to clear");
                    return Ok(());
                }
                store.set_instructions("");
                println!("Cleared special instructions");
                Ok(())
            }

            InstructionsSubcommand::Show => {
                let field = store.instructions_field();
                if field.text().is_empty() {
                    println!("No special instructions");
                } else {
                    println!("{}", field.text());
                }
                let note = if field.is_at_limit() {
                    " (limit reached)"
                } else if field.is_near_limit() {
                    " (near limit)"
                } else {
                    ""
                };
                println!(
                    "\n{}/{} characters, {} remaining{}",
                    field.count(),
                    field.max(),
                    field.remaining(),
                    note
                );
                Ok(())
            }
        }
    }
}
