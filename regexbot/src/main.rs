// regexbot/src/main.rs
//! regexbot entry point.
//!
//! Loads the configuration, builds the bot and dispatches to the chosen
//! subcommand. An unusable configuration stops the process before any input
//! is read.

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io;

use regexbot::cli::{Cli, Commands};
use regexbot::{logger, run_console, run_eval, RunOptions};
use regexbot_core::{BotConfig, RegexBot};

fn load_config(cli: &Cli) -> Result<BotConfig> {
    match &cli.config {
        Some(path) => BotConfig::load_from_file(path),
        None => {
            debug!("No configuration file given, using built-in defaults.");
            BotConfig::load_default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if cli.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if cli.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    let config = load_config(&cli).context("Failed to load configuration")?;
    let stdout = io::stdout();
    let color = stdout.is_terminal();

    match cli.command {
        Commands::Run(args) => {
            let bot = RegexBot::new(config).context("Failed to start regexbot")?;
            info!("regexbot {} reading from stdin.", env!("CARGO_PKG_VERSION"));
            let reader = tokio::io::BufReader::new(tokio::io::stdin());
            let opts = RunOptions { json: args.json, color };
            run_console(&bot, reader, &mut stdout.lock(), &opts).await?;
        }
        Commands::Eval(args) => {
            run_eval(config, &args.command, &args.lines, args.json, color, &mut stdout.lock()).await?;
        }
    }

    Ok(())
}
