//! Command-line front end
//!
//! `show` pops a notification; `config` and `completions` only print.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

use crate::logging::default_log_path;

/// Transient desktop popup notifications that log themselves and dismiss on a timer
#[derive(Parser, Debug)]
#[command(name = "blink")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log file (default: log/out.log in the current directory)
    #[arg(
        long,
        env = "BLINK_LOG_FILE",
        default_value_os_t = default_log_path(),
        global = true
    )]
    pub log_file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Config file (default: ~/.config/blink/config.toml)
    #[arg(short, long, env = "BLINK_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a notification and show it in a popup until it expires
    Show {
        /// Window title
        title: String,

        /// Message shown in the popup
        message: String,

        /// Display time in milliseconds (default: from config, 800)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        duration_ms: Option<u64>,
    },

    /// Print an example configuration file
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Generate shell completions and print to stdout
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "blink", &mut io::stdout());
}
