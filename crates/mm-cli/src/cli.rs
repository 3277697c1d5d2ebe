//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// menu-migrate - Versioned migrations for webapp menus
#[derive(Parser, Debug)]
#[command(name = "menu-migrate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override database path (also read from MENU_MIGRATIONS_DATABASE)
    #[arg(short, long, global = true)]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply or roll back migrations to reach a version
    Migrate(MigrateArgs),

    /// Show discovered migrations and whether they are applied
    Status(StatusArgs),

    /// Create a new migration file from a template
    New(NewArgs),
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Target version (sequence number); latest when omitted, 0 rolls back everything
    #[arg(long)]
    pub to: Option<i64>,

    /// Generate and print scripts without executing them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Short description, used for the file name
    pub description: String,

    /// Webapp the migration belongs to (defaults to `webapp` in the config)
    #[arg(short, long)]
    pub webapp: Option<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
