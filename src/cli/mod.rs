//! CLI module for isthisup
//!
//! # Commands
//!
//! - `run` - Watch the target forever, alerting when it goes down
//! - `check` - Run a single check and print the verdict (never alerts)
//! - `config init` - Write an example configuration file
//!
//! # Example
//!
//! ```bash
//! # Configure from the environment and start watching
//! URL=https://example.com PLATFORM=pagerduty API_KEY=... SLEEP=60 TIMEOUT=10 \
//!   RETRY=3 RETRY_TIMEOUT=5 SSL_DAYS_LIMIT=14 isthisup run
//!
//! # One-off check using a config file
//! isthisup check -c isthisup.toml --json
//! ```

pub mod check;
pub mod config;
pub mod output;
pub mod run;

pub use check::handle_check;
pub use config::handle_config_init;
pub use run::run_watchdog;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// isthisup - single-target availability watchdog
#[derive(Parser, Debug)]
#[command(
    name = "isthisup",
    version,
    about = "Watch one website and page someone when it goes down"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the target forever
    Run(RunArgs),
    /// Check the target once without alerting
    Check(CheckArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// TOML configuration file; environment variables override it.
    /// Without it, every setting comes from the environment.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// TOML configuration file; environment variables override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write an example configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "isthisup.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}
