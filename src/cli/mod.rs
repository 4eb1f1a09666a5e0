//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// erpsync - ERP to CRM customer sync service
#[derive(Parser, Debug)]
#[command(name = "erpsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "erpsync.toml", env = "ERPSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ERPSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API and the periodic sync
    Serve(commands::serve::ServeArgs),

    /// Run a single sync pass
    Sync(commands::sync::SyncArgs),

    /// Show the sync audit log
    Logs(commands::logs::LogsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
