// regexbot-core/src/bot.rs
//! The regexbot orchestrator.
//!
//! [`RegexBot::handle`] is the single entry point for the transport layer: it
//! takes one inbound chat event and returns what, if anything, to post back.
//! Plain lines are recorded in the channel history. Commands pass through the
//! ignore list, the flood gate and the parser, and are then applied to the
//! newest matching history line under a scan deadline.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::command::{Command, CommandParser, ParsedMessage};
use crate::config::BotConfig;
use crate::engine::Rewriter;
use crate::engines::regex_engine::SubstituteRewriter;
use crate::engines::translate_engine::TranslateRewriter;
use crate::errors::{CommandError, RegexBotError};
use crate::filters::flood::FloodController;
use crate::filters::ignore::IgnoreFilter;
use crate::history::{HistoryEntry, HistoryStore};
use crate::runtime::{AttemptOutcome, MatchRuntime};

/// Words in a mention that trigger the help reply.
const HELP_KEYWORDS: [&str; 3] = ["help", "info", "?"];

/// One chat event as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub sender_id: String,
    pub channel_id: String,
    pub text: String,
    /// Third-person ("/me") line.
    pub is_action: bool,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(
        sender_id: impl Into<String>,
        channel_id: impl Into<String>,
        text: impl Into<String>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            channel_id: channel_id.into(),
            text: text.into(),
            is_action: false,
            received_at,
        }
    }

    pub fn action(mut self) -> Self {
        self.is_action = true;
        self
    }
}

/// What the transport should post back, if anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    NoReply,
    /// Post `text` as the bot.
    PlainReply { text: String },
    /// Post `text`, optionally presented as coming from `sender_id`.
    AttributedReply { text: String, sender_id: String },
}

impl Reply {
    fn plain(text: impl Into<String>) -> Self {
        Reply::PlainReply { text: text.into() }
    }

    fn to_sender(sender_id: &str, message: impl std::fmt::Display) -> Self {
        Reply::plain(format!("<@{}>: {}", sender_id, message))
    }

    pub fn is_reply(&self) -> bool {
        !matches!(self, Reply::NoReply)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Reply::NoReply => None,
            Reply::PlainReply { text } | Reply::AttributedReply { text, .. } => Some(text),
        }
    }
}

/// A rewritten line ready to be committed to history.
#[derive(Debug)]
struct Rewrite {
    replaced: HistoryEntry,
    text: String,
}

/// The per-process bot state: immutable configuration plus the mutable
/// history and flood stores, each behind its own lock.
#[derive(Debug)]
pub struct RegexBot {
    config: BotConfig,
    parser: CommandParser,
    ignore: IgnoreFilter,
    runtime: MatchRuntime,
    flood: Mutex<FloodController>,
    history: Mutex<HistoryStore>,
}

impl RegexBot {
    /// Builds a bot. Fails if the configuration is invalid or an ignore
    /// pattern does not compile.
    pub fn new(config: BotConfig) -> Result<Self, RegexBotError> {
        config.validate()?;
        let ignore = IgnoreFilter::compile(&config.ignore)?;
        info!(
            "regexbot ready: {} ignore rules, {} lines per channel, {} ms per attempt.",
            ignore.len(),
            config.max_messages,
            config.attempt_timeout_ms
        );
        Ok(Self {
            parser: CommandParser::new(config.bot_name.clone()),
            runtime: MatchRuntime::new(config.attempt_timeout()),
            flood: Mutex::new(FloodController::new(config.channel_cooldown(), config.global_cooldown())),
            history: Mutex::new(HistoryStore::new(config.max_messages)),
            ignore,
            config,
        })
    }

    /// Copy of a channel's history, oldest first.
    pub async fn history_snapshot(&self, channel_id: &str) -> Vec<HistoryEntry> {
        self.history.lock().await.snapshot(channel_id)
    }

    /// Handles one inbound chat event.
    pub async fn handle(&self, msg: &InboundMessage) -> Reply {
        self.history.lock().await.touch(&msg.channel_id);

        match self.parser.parse(&msg.text) {
            ParsedMessage::Mention => self.handle_mention(msg).await,
            ParsedMessage::PlainText => {
                self.record(msg).await;
                Reply::NoReply
            }
            ParsedMessage::Invalid(err) => self.handle_command(msg, Err(err)).await,
            ParsedMessage::Command(command) => self.handle_command(msg, Ok(command)).await,
        }
    }

    /// Appends `msg` to its channel history, truncated, without parsing it.
    pub async fn record(&self, msg: &InboundMessage) {
        let text = truncate_chars(&msg.text, self.config.max_message_size);
        self.history
            .lock()
            .await
            .append(&msg.channel_id, msg.sender_id.as_str(), text, msg.is_action);
    }

    async fn handle_mention(&self, msg: &InboundMessage) -> Reply {
        let lowered = msg.text.to_lowercase();
        if !HELP_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            return Reply::NoReply;
        }
        if !self.flood_allows(msg).await {
            return Reply::NoReply;
        }
        Reply::to_sender(
            &msg.sender_id,
            format!(
                "I am regexbot, the interactive Slack regular expression tool, originally written by micolous.  Source/docs/version: {}",
                self.config.version_banner()
            ),
        )
    }

    async fn flood_allows(&self, msg: &InboundMessage) -> bool {
        self.flood.lock().await.allow(&msg.channel_id, msg.received_at)
    }

    async fn handle_command(&self, msg: &InboundMessage, parsed: Result<Command, CommandError>) -> Reply {
        if let Some(rule) = self.ignore.matching_rule(&msg.sender_id) {
            info!(
                "Ignoring message from {} because of: {} ({})",
                msg.sender_id,
                rule.label,
                rule.pattern.as_str()
            );
            return Reply::NoReply;
        }

        if !self.flood_allows(msg).await {
            return Reply::NoReply;
        }

        match self.execute(msg, parsed).await {
            Ok(Some(reply)) => reply,
            Ok(None) => Reply::to_sender(&msg.sender_id, "no match found"),
            Err(err) => Reply::to_sender(&msg.sender_id, err),
        }
    }

    /// Runs a command that passed the gates. `Ok(None)` means nothing matched.
    async fn execute(
        &self,
        msg: &InboundMessage,
        parsed: Result<Command, CommandError>,
    ) -> Result<Option<Reply>, CommandError> {
        let snapshot = self.history.lock().await.snapshot(&msg.channel_id);
        if snapshot.is_empty() {
            return Err(CommandError::EmptyBuffer);
        }

        let rewriter: Arc<dyn Rewriter> = match parsed? {
            Command::Substitute {
                original,
                replacement,
                ignore_case,
                ..
            } => Arc::new(SubstituteRewriter::compile(&original, &replacement, ignore_case)?),
            Command::Translate { from_set, to_set, .. } => Arc::new(TranslateRewriter::new(&from_set, &to_set)?),
        };

        let Some(rewrite) = self.scan(&snapshot, rewriter, self.config.scan_timeout()).await else {
            return Ok(None);
        };

        let text = sanitize_output(&rewrite.text, self.config.max_message_size)?;
        self.history
            .lock()
            .await
            .replace(&msg.channel_id, &rewrite.replaced, text.as_str());
        debug!("Rewrote line from {} in {}: {:?}", rewrite.replaced.sender_id, msg.channel_id, text);

        Ok(Some(self.render(&rewrite.replaced, text)))
    }

    /// Walks `snapshot` newest to oldest and returns the first rewrite.
    /// No new attempt starts once `budget` has elapsed.
    async fn scan(&self, snapshot: &[HistoryEntry], rewriter: Arc<dyn Rewriter>, budget: Duration) -> Option<Rewrite> {
        // an unrepresentable deadline never expires
        let deadline = Instant::now().checked_add(budget);

        for entry in snapshot.iter().rev() {
            if deadline.is_some_and(|d| Instant::now() > d) {
                info!("Scan deadline reached after {:?}, giving up.", budget);
                break;
            }

            let outcome = if rewriter.needs_supervision() {
                self.runtime
                    .try_match_and_replace(Arc::clone(&rewriter), entry.text.clone())
                    .await
            } else {
                match rewriter.rewrite(&entry.text) {
                    Some(text) => AttemptOutcome::Matched(text),
                    None => AttemptOutcome::NoMatch,
                }
            };

            if let AttemptOutcome::Matched(text) = outcome {
                return Some(Rewrite {
                    replaced: entry.clone(),
                    text,
                });
            }
        }
        None
    }

    fn render(&self, replaced: &HistoryEntry, text: String) -> Reply {
        if replaced.is_action {
            let line = format!(" * <@{}> {}", replaced.sender_id, text);
            Reply::plain(truncate_chars(&line, self.config.max_message_size))
        } else {
            Reply::AttributedReply {
                text,
                sender_id: replaced.sender_id.clone(),
            }
        }
    }
}

/// Returns the first `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Strips line breaks, truncates, and refuses any remaining control character.
pub fn sanitize_output(text: &str, max_message_size: usize) -> Result<String, CommandError> {
    let stripped: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    let truncated = truncate_chars(&stripped, max_message_size);
    if truncated.chars().any(|c| (c as u32) < 0x20) {
        return Err(CommandError::DisallowedControlCharacter);
    }
    Ok(truncated.to_string())
}
