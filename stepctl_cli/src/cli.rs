//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "stepctl", version, about = "Stepper control CLI")]
pub struct Cli {
    /// Path to config TOML; built-in defaults apply when the file is absent
    #[arg(long, value_name = "FILE", default_value = "etc/stepctl.toml")]
    pub config: PathBuf,

    /// Emit events, results and errors as JSON instead of pretty text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and validate the config, print the effective settings
    Check,
    /// Drive a scripted sequence of stepper events and print the outcome
    Run {
        /// Comma-separated ops: `+`, `-`, `hold+:N`, `hold-:N`,
        /// `edit:TEXT`, `step:X`, `limits:LO..HI` (either side may be empty)
        #[arg(long, value_name = "OPS")]
        ops: String,
    },
}
