// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `spelltree`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "spelltree",
    version,
    about = "Validate and repair generated spell prerequisite trees.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the generated tree document (JSON).
    #[arg(long, value_name = "PATH")]
    pub input: String,

    /// Path to the config file (TOML).
    ///
    /// If omitted, `Spelltree.toml` is used when it exists, otherwise defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Write the finalized tree here instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<String>,

    /// Run prerequisite injection regardless of `[injection].enabled`.
    #[arg(long)]
    pub inject: bool,

    /// Seed for injection; overrides `[injection].seed`.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Repair, then print the report and any invariant violations without
    /// writing output. Exits non-zero if violations remain.
    #[arg(long)]
    pub check: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SPELLTREE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
