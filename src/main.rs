use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lessons::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "lessons")]
#[command(about = "Unlockable tutorial lessons for the profiler")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.lessons/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show unlocked categories and their visible lessons
    List {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a lesson's content and clear its "new" badge
    Show {
        /// Lesson id
        id: String,

        /// Open documentation links in the browser
        #[arg(long)]
        open: bool,
    },

    /// Mark a lesson as done
    Complete {
        /// Lesson id
        id: String,
    },

    /// Clear the "new" badge of a lesson
    Seen {
        /// Lesson id
        id: Option<String>,

        /// Clear every visible badge
        #[arg(long, conflicts_with = "id")]
        all: bool,
    },

    /// Validate the built-in lesson catalog
    Validate,

    /// Delete all saved lesson progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Create a documented config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.unwrap_or_else(Config::global_config_path);
    let load_config = || Config::load_or_default(&config_path);

    match cli.command {
        Some(Commands::List { json }) => cli::list::list_command(&load_config()?, json)?,
        Some(Commands::Show { id, open }) => cli::show::show_command(&load_config()?, &id, open)?,
        Some(Commands::Complete { id }) => cli::complete::complete_command(&load_config()?, &id)?,
        Some(Commands::Seen { id, all }) => {
            cli::seen::seen_command(&load_config()?, id.as_deref(), all)?;
        }
        Some(Commands::Validate) => cli::validate::validate_command()?,
        Some(Commands::Reset { yes }) => cli::reset::reset_command(&load_config()?, yes)?,
        Some(Commands::Init { force }) => cli::init::init_command(&config_path, force)?,
        None => {
            // Default: list lessons
            cli::list::list_command(&load_config()?, false)?;
        }
    }

    Ok(())
}
