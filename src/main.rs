// Clippy configuration: enable pedantic but allow overly strict lints
#![allow(clippy::missing_errors_doc)] // Internal functions don't need # Errors docs
#![allow(clippy::module_name_repetitions)] // e.g., NotifierConfig in config module is fine
#![allow(clippy::doc_markdown)] // Don't require backticks around TOML, egui, etc.

//! Blink - show a transient popup notification from the command line
//!
//! Usage:
//!   blink show "Build" "All tests passed"      # 800 ms popup
//!   blink show "Backup" "Done" -d 2000         # custom display time
//!   blink config > ~/.config/blink/config.toml

use blink::cli::{self, Cli, Commands};
use blink::logging::{self, LogConfig, TracingSink};
use blink::{NotificationRequest, Notifier, NotifierConfig};
use clap::Parser;
use color_eyre::Result;
use std::time::Duration;

fn load_config(cli: &Cli) -> Result<NotifierConfig> {
    match &cli.config {
        Some(path) => Ok(NotifierConfig::load_strict(path)?),
        None => Ok(NotifierConfig::load()),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Config => {
            print!("{}", NotifierConfig::example());
            return Ok(());
        }
        Commands::Completions { shell } => {
            cli::print_completions(shell);
            return Ok(());
        }
        Commands::Show { .. } => {
            // Show mode: continue with full setup
        }
    }

    // Initialize error handling
    color_eyre::install()?;

    // Setup file logging
    let _guard = logging::init(&LogConfig {
        path: cli.log_file.clone(),
        level: cli.log_level.clone(),
    })?;

    tracing::debug!("Starting blink v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    if let Commands::Show {
        title,
        message,
        duration_ms,
    } = cli.command
    {
        let duration = duration_ms.map_or_else(|| config.duration(), Duration::from_millis);
        let notifier = Notifier::from_config(TracingSink, &config);
        notifier.send(NotificationRequest::new(title, message).with_duration(duration))?;
    }

    Ok(())
}
