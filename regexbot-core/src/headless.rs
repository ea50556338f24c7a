// File: regexbot-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for evaluating a single command outside a chat session.
//!
//! A throw-away bot is seeded with the given history lines and the command is
//! applied once. Seed lines are recorded verbatim, even when they look like
//! commands or mentions. Flood control is disabled for the run; the ignore list and
//! every other limit of the supplied configuration still apply.

use anyhow::Result;
use chrono::Utc;

use crate::bot::{InboundMessage, RegexBot, Reply};
use crate::config::BotConfig;

/// Channel and sender identifiers used for headless runs.
pub const HEADLESS_CHANNEL: &str = "headless";
pub const HEADLESS_SENDER: &str = "local-user";

/// Applies `command` to `lines` (oldest first) and returns the reply.
///
/// # Arguments
///
/// * `config` - Base configuration; cooldowns are zeroed for the run.
/// * `command` - The `s`/`y` command text, exactly as typed in chat.
/// * `lines` - History to seed, oldest first, all attributed to one sender.
pub async fn headless_rewrite<S: AsRef<str>>(config: BotConfig, command: &str, lines: &[S]) -> Result<Reply> {
    let config = BotConfig {
        channel_flood_cooldown: 0,
        global_flood_cooldown: 0,
        ..config
    };
    let bot = RegexBot::new(config)?;
    let now = Utc::now();

    for line in lines {
        bot.record(&InboundMessage::new(HEADLESS_SENDER, HEADLESS_CHANNEL, line.as_ref(), now))
            .await;
    }

    Ok(bot
        .handle(&InboundMessage::new(HEADLESS_SENDER, HEADLESS_CHANNEL, command, now))
        .await)
}
