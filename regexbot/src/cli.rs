// regexbot/src/cli.rs
//! This file defines the command-line interface (CLI) for the regexbot binary,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "regexbot",
    version = env!("CARGO_PKG_VERSION"),
    about = "sed-style message correction for chat channels",
    long_about = "regexbot keeps a short history of every channel it sees and answers `s/pattern/replacement/flags` and `y/from/to/` commands by rewriting the most recent matching line. This binary drives the engine from the console: feed it chat lines on stdin, or evaluate a single command against a few lines.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a YAML configuration file.
    #[arg(
        long = "config",
        short = 'c',
        value_name = "FILE",
        env = "REGEXBOT_CONFIG",
        global = true,
        help = "Path to a YAML configuration file (defaults to the built-in configuration)."
    )]
    pub config: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `regexbot` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reads `<channel> <sender> <text>` lines from stdin and prints replies.
    #[command(about = "Run the bot against chat lines read from stdin.")]
    Run(RunCommand),

    /// Applies one command to the given history lines.
    #[command(about = "Evaluate a single command against some history lines.")]
    Eval(EvalCommand),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunCommand {
    /// Print replies as JSON objects, one per line.
    #[arg(long, help = "Print replies as JSON objects, one per line.")]
    pub json: bool,
}

/// Arguments for the `eval` command.
#[derive(Parser, Debug)]
pub struct EvalCommand {
    /// The command, e.g. `s/foo/bar/i`.
    #[arg(value_name = "COMMAND", help = "The command to evaluate, e.g. 's/foo/bar/i'.")]
    pub command: String,

    /// History lines, oldest first.
    #[arg(value_name = "LINE", help = "History lines, oldest first.")]
    pub lines: Vec<String>,

    /// Print the reply as JSON.
    #[arg(long, help = "Print the reply as a JSON object.")]
    pub json: bool,
}
