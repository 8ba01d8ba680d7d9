// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `crondag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "crondag",
    version,
    about = "Run command DAGs on a fixed wall-clock cadence.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Crondag.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Crondag.toml")]
    pub config: String,

    /// Run every job's DAG once, ignoring cadence, then exit.
    #[arg(long)]
    pub once: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CRONDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print jobs and their DAGs, but don't execute.
    #[arg(long)]
    pub dry_run: bool,
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
