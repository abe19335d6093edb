use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slipway", version, about = "Apply SQL migration scripts in a single transaction")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[arg(long, global = true, env = "SLIPWAY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// How to reach the target database. `--project-ref` takes precedence over `--database-url`.
#[derive(Args, Clone, Default)]
pub struct ConnectionArgs {
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, global = true, env = "SLIPWAY_PROJECT_REF")]
    pub project_ref: Option<String>,

    #[arg(long, global = true, env = "SLIPWAY_DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Route through the regional connection pooler instead of the direct host.
    #[arg(long, global = true, env = "SLIPWAY_REGION")]
    pub region: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply a script atomically.
    Apply(ApplyArgs),
    /// Print the statements a script splits into.
    Split(SplitArgs),
    /// Run the safety checks without touching a database.
    Validate(ValidateArgs),
    /// List tables in the public schema.
    Tables(TablesArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ApplyArgs {
    /// Script file, or `-` for stdin.
    #[arg(value_name = "FILE")]
    pub script: PathBuf,

    /// Execute every statement, then roll back.
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    #[arg(value_name = "FILE")]
    pub script: PathBuf,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(value_name = "FILE")]
    pub script: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct TablesArgs {
    /// Also count rows in each table.
    #[arg(long)]
    pub counts: bool,
}
