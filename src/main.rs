use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod session;

use commands::{ConfigCommand, PreferencesCommand, ShellCommand};
use config::{Config, ConfigSource, ConfigValue};
use mealprefs::Seed;
use session::Session;

#[derive(Parser)]
#[command(name = "mealprefs")]
#[command(version)]
#[command(about = "Record a resident's meal preferences", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Preferences file to read and write
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Start from the sample document when the preferences file doesn't exist
    #[arg(long, global = true)]
    sample: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Preferences(PreferencesCommand),

    /// Edit preferences interactively in one session
    Shell(ShellCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mealprefs=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration, then apply command line overrides
    let mut config = Config::load(cli.config)?;
    if let Some(file) = cli.file {
        config.data_file = ConfigValue::new(file, ConfigSource::CommandLine);
    }
    if cli.sample {
        config.seed = ConfigValue::new(Seed::Sample, ConfigSource::CommandLine);
    }

    match cli.command {
        Some(Commands::Preferences(cmd)) => {
            let mut session = Session::open(&config)?;
            cmd.run(&mut session, &config)?;

            // Save only if the command actually changed something
            if session.has_unsaved_changes() {
                session.save()?;
            }
        }
        Some(Commands::Shell(cmd)) => {
            let mut session = Session::open(&config)?;
            cmd.run(&mut session, &config).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
