//! `eval` command: one command against a handful of history lines.

use anyhow::{Context, Result};
use log::debug;
use std::io::Write;

use regexbot_core::{headless_rewrite, BotConfig};
use regexbot_core::headless::HEADLESS_CHANNEL;

use crate::console::render_reply;

/// Evaluates `command` against `lines` and writes the reply, if any.
///
/// Returns whether a reply was written.
pub async fn run_eval<W: Write>(
    config: BotConfig,
    command: &str,
    lines: &[String],
    json: bool,
    color: bool,
    writer: &mut W,
) -> Result<bool> {
    debug!("Evaluating {:?} against {} lines.", command, lines.len());
    let reply = headless_rewrite(config, command, lines)
        .await
        .context("Evaluation failed")?;

    match render_reply(HEADLESS_CHANNEL, &reply, json, color)? {
        Some(rendered) => {
            writeln!(writer, "{}", rendered)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
