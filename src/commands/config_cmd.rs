use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

const DEFAULT_CONFIG: &str = r#"# mealprefs configuration

# Preferences file (default: platform data dir + mealprefs/preferences.json)
# data_file: preferences.json

# Document to start from when no preferences file exists: empty or sample
seed: empty

# How long shell notifications stay visible, in milliseconds
notification_ms: 2000

# Shown in the header of `mealprefs show`
# resident:
#   name: Margaret Smith
#   room: "204"
"#;

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        println!("data_file: {}", config.data_file.value.display());
                        println!("  source: {}", config.data_file.source);
                        println!();

                        println!("seed: {}", config.seed.value);
                        println!("  source: {}", config.seed.source);
                        println!();

                        println!("notification_ms: {}", config.notification_ms.value);
                        println!("  source: {}", config.notification_ms.source);
                        println!();

                        println!(
                            "resident.name: {}",
                            config.resident.name.as_deref().unwrap_or("(not set)")
                        );
                        println!(
                            "resident.room: {}",
                            config.resident.room.as_deref().unwrap_or("(not set)")
                        );
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = Config::default_config_path();

                // Check if config already exists
                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'mealprefs config show' to view current configuration.");
                    return Ok(());
                }

                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut file = fs::File::create(&config_path)?;
                file.write_all(DEFAULT_CONFIG.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, DEFAULT_CONFIG).unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.notification_ms.value, 2000);
        assert!(config.resident.name.is_none());
    }
}
