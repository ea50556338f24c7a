//! `run` command: the console transport.
//!
//! Every stdin line becomes one inbound event, stamped with the current time
//! when it is read. Replies go to stdout; malformed lines are logged and
//! skipped.

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use regexbot_core::RegexBot;

use crate::console::{parse_console_line, render_reply};

/// Options for the console loop.
pub struct RunOptions {
    pub json: bool,
    pub color: bool,
}

/// Feeds `reader` into `bot` until EOF, writing replies to `writer`.
///
/// Returns the number of replies written.
pub async fn run_console<R, W>(bot: &RegexBot, reader: R, writer: &mut W, opts: &RunOptions) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    info!("Starting console transport.");
    let mut lines = reader.lines();
    let mut replies = 0usize;

    while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let msg = match parse_console_line(line, Utc::now()) {
            Ok(msg) => msg,
            Err(e) => {
                warn!("Skipping input line: {}", e);
                continue;
            }
        };

        let reply = bot.handle(&msg).await;
        debug!("{} in {} -> {:?}", msg.sender_id, msg.channel_id, reply);

        if let Some(rendered) = render_reply(&msg.channel_id, &reply, opts.json, opts.color)? {
            writeln!(writer, "{}", rendered)?;
            writer.flush()?;
            replies += 1;
        }
    }

    info!("Console transport finished after {} replies.", replies);
    Ok(replies)
}
