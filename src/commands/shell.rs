use clap::{Args, Parser, Subcommand};
use mealprefs::{Notification, Notifier};
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{OutputFormat, PreferencesCommand};
use crate::config::Config;
use crate::session::Session;

#[derive(Args)]
pub struct ShellCommand {
    /// Save the preferences file after every change
    #[arg(long)]
    pub autosave: bool,
}

/// One line typed into the shell.
#[derive(Parser)]
#[command(name = "mealprefs", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    action: ShellAction,
}

#[derive(Subcommand)]
enum ShellAction {
    #[command(flatten)]
    Preferences(PreferencesCommand),

    /// Show the changes made in this session
    History {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Save the preferences file
    Save,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

impl ShellCommand {
    pub async fn run(
        &self,
        session: &mut Session,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut notifier = Notifier::new(Duration::from_millis(config.notification_ms.value));
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        println!("Meal preferences shell. Type 'help' for commands, 'exit' to leave.");
        loop {
            prompt(&notifier)?;
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let tokens = match split_line(&line) {
                Ok(tokens) if tokens.is_empty() => continue,
                Ok(tokens) => tokens,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    continue;
                }
            };
            let action = match ShellLine::try_parse_from(tokens) {
                Ok(parsed) => parsed.action,
                Err(e) => {
                    e.print()?;
                    continue;
                }
            };

            match action {
                ShellAction::Preferences(cmd) => {
                    let before = session.store.revision();
                    if let Err(e) = cmd.run(session, config) {
                        eprintln!("Error: {}", e);
                    }
                    if !cmd.is_write() {
                        continue;
                    }

                    let applied = session.store.revision() != before;
                    match session.store.change_log().entries().last() {
                        Some(entry) if applied => {
                            notifier.show(Notification::success(entry.change.action()))
                        }
                        _ => notifier.show(Notification::error("No changes made")),
                    }
                    if self.autosave && session.has_unsaved_changes() {
                        save(session, &mut notifier);
                    }
                }

                ShellAction::History { format } => {
                    let entries = session.store.change_log().entries();
                    match format {
                        OutputFormat::Json => {
                            println!("{}", serde_json::to_string_pretty(entries)?);
                        }
                        OutputFormat::Text => {
                            if entries.is_empty() {
                                println!("No changes in this session");
                            }
                            for entry in entries {
                                println!(
                                    "{}  {:<28}  {}",
                                    entry.at.with_timezone(&chrono::Local).format("%H:%M:%S"),
                                    entry.change.action(),
                                    entry.change.payload()
                                );
                            }
                        }
                    }
                }

                ShellAction::Save => save(session, &mut notifier),

                ShellAction::Exit => break,
            }
        }

        if session.has_unsaved_changes() {
            println!("Unsaved changes were discarded.");
        }
        Ok(())
    }
}

fn save(session: &mut Session, notifier: &mut Notifier) {
    match session.save() {
        Ok(()) => {
            println!("Saved to {}", session.file().path().display());
            notifier.show(Notification::success("Preferences saved"));
        }
        Err(e) => {
            tracing::warn!("Failed to save preferences: {}", e);
            eprintln!("Error: {}", e);
            notifier.show(Notification::error("Failed to save preferences"));
        }
    }
}

fn prompt(notifier: &Notifier) -> io::Result<()> {
    let mut stdout = io::stdout();
    if let Some(notification) = notifier.current() {
        write!(stdout, "[{}] ", notification)?;
    }
    write!(stdout, "mealprefs> ")?;
    stdout.flush()
}

/// Splits a shell line into words. Single or double quotes group words.
fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(format!("Unterminated {} quote", q));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
