// regexbot-core/src/lib.rs
//! # regexbot Core Library
//!
//! `regexbot-core` is the transport-independent heart of regexbot, a chat bot
//! that lets people fix their (or anyone's) recent messages with sed-style
//! commands:
//!
//! * `s/pattern/replacement/flags` rewrites the newest matching line with a
//!   regular expression (`i` flag for case-insensitive matching).
//! * `y/abc/xyz/` transliterates characters in the newest line it changes.
//!
//! The library keeps a bounded history per channel, enforces global and
//! per-channel flood cooldowns, honours a sender ignore list, and runs every
//! regex attempt under a hard time slice so that a hostile pattern cannot stall
//! the bot.
//!
//! ## Modules
//!
//! * `config`: `BotConfig` and YAML loading/validation.
//! * `errors`: `RegexBotError` (library faults) and `CommandError` (user-facing replies).
//! * `filters`: the ignore list and the flood controller.
//! * `history`: per-channel bounded history with move-to-newest rewrites.
//! * `command`: classification of chat text into plain lines, mentions and commands.
//! * `engine`: the `Rewriter` trait.
//! * `engines`: the substitute and transliterate rewriters.
//! * `runtime`: deadline-bounded execution of one rewrite attempt.
//! * `bot`: `RegexBot`, the orchestrator the transport calls into.
//! * `headless`: one-shot evaluation without a chat session.
//!
//! ## Usage Example
//!
//! ```rust
//! use regexbot_core::{BotConfig, InboundMessage, RegexBot, Reply};
//! use chrono::Utc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let bot = RegexBot::new(BotConfig::default())?;
//! let now = Utc::now();
//!
//! bot.handle(&InboundMessage::new("U1", "C1", "I love regular expresions", now)).await;
//! let reply = bot.handle(&InboundMessage::new("U2", "C1", "s/expresions/expressions/", now)).await;
//!
//! assert_eq!(
//!     reply,
//!     Reply::AttributedReply {
//!         text: "I love regular expressions".to_string(),
//!         sender_id: "U1".to_string(),
//!     }
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Mistakes in chat commands never surface as `Err`: they become a
//! `Reply::PlainReply` addressed to the sender. Only construction can fail,
//! with a `RegexBotError`, when the configuration is unusable.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod bot;
pub mod command;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod filters;
pub mod headless;
pub mod history;
pub mod runtime;

/// Re-exports the orchestrator and its input/output types.
pub use bot::{sanitize_output, truncate_chars, InboundMessage, RegexBot, Reply};

/// Re-exports the command parser types.
pub use command::{Command, CommandParser, ParsedMessage, SEPARATORS};

/// Re-exports configuration types.
pub use config::{BotConfig, IgnoreRuleConfig};

/// Re-exports the error types.
pub use errors::{CommandError, RegexBotError};

/// Re-exports the `Rewriter` trait and its implementations.
pub use engine::Rewriter;
pub use engines::regex_engine::SubstituteRewriter;
pub use engines::translate_engine::TranslateRewriter;

/// Re-exports the gates.
pub use filters::flood::FloodController;
pub use filters::ignore::{IgnoreFilter, IgnoreRule};

/// Re-exports history types.
pub use history::{ChannelHistory, HistoryEntry, HistoryStore};

/// Re-exports the cancellable runtime.
pub use runtime::{AttemptOutcome, MatchRuntime};

/// Re-exports the one-shot helper.
pub use headless::headless_rewrite;
