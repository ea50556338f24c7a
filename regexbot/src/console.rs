// regexbot/src/console.rs
//! Line format of the console transport.
//!
//! Input lines look like `<channel> <sender> <text>`. A text starting with
//! `/me ` is a third-person action line. Replies are printed as
//! `[channel] text`, or `[channel] <sender> text` when the reply carries the
//! identity of the line's original author.

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use thiserror::Error;

use regexbot_core::{InboundMessage, Reply};

const ACTION_PREFIX: &str = "/me ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleLineError {
    #[error("expected '<channel> <sender> <text>', got {0:?}")]
    MissingFields(String),
}

/// Parses one console input line.
pub fn parse_console_line(line: &str, received_at: DateTime<Utc>) -> Result<InboundMessage, ConsoleLineError> {
    let mut fields = line.splitn(3, ' ');
    let (Some(channel), Some(sender), Some(text)) = (fields.next(), fields.next(), fields.next()) else {
        return Err(ConsoleLineError::MissingFields(line.to_string()));
    };
    if channel.is_empty() || sender.is_empty() {
        return Err(ConsoleLineError::MissingFields(line.to_string()));
    }

    let message = match text.strip_prefix(ACTION_PREFIX) {
        Some(action) => InboundMessage::new(sender, channel, action, received_at).action(),
        None => InboundMessage::new(sender, channel, text, received_at),
    };
    Ok(message)
}

#[derive(Serialize)]
struct ReplyRecord<'a> {
    channel: &'a str,
    #[serde(flatten)]
    reply: &'a Reply,
}

/// Renders a reply for stdout. `NoReply` renders to nothing.
pub fn render_reply(channel: &str, reply: &Reply, json: bool, color: bool) -> anyhow::Result<Option<String>> {
    if !reply.is_reply() {
        return Ok(None);
    }
    if json {
        return Ok(Some(serde_json::to_string(&ReplyRecord { channel, reply })?));
    }

    let tag = format!("[{}]", channel);
    let tag = if color { tag.cyan().to_string() } else { tag };
    let line = match reply {
        Reply::NoReply => return Ok(None),
        Reply::PlainReply { text } => format!("{} {}", tag, text),
        Reply::AttributedReply { text, sender_id } => {
            let who = format!("<{}>", sender_id);
            let who = if color { who.bold().to_string() } else { who };
            format!("{} {} {}", tag, who, text)
        }
    };
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_parse_plain_line() {
        let msg = parse_console_line("general alice hello there world", now()).unwrap();
        assert_eq!(msg.channel_id, "general");
        assert_eq!(msg.sender_id, "alice");
        assert_eq!(msg.text, "hello there world");
        assert!(!msg.is_action);
    }

    #[test]
    fn test_parse_action_line() {
        let msg = parse_console_line("general alice /me waves", now()).unwrap();
        assert_eq!(msg.text, "waves");
        assert!(msg.is_action);
    }

    #[test]
    fn test_parse_rejects_short_lines() {
        assert!(parse_console_line("general alice", now()).is_err());
        assert!(parse_console_line(" alice text", now()).is_err());
    }

    #[test]
    fn test_render_plain_and_attributed() {
        let plain = Reply::PlainReply { text: "<@bob>: no match found".to_string() };
        assert_eq!(
            render_reply("general", &plain, false, false).unwrap().as_deref(),
            Some("[general] <@bob>: no match found")
        );

        let attributed = Reply::AttributedReply {
            text: "fixed".to_string(),
            sender_id: "alice".to_string(),
        };
        assert_eq!(
            render_reply("general", &attributed, false, false).unwrap().as_deref(),
            Some("[general] <alice> fixed")
        );
        assert_eq!(render_reply("general", &Reply::NoReply, true, false).unwrap(), None);
    }

    #[test]
    fn test_render_json() {
        let attributed = Reply::AttributedReply {
            text: "fixed".to_string(),
            sender_id: "alice".to_string(),
        };
        let json = render_reply("general", &attributed, true, false).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["channel"], "general");
        assert_eq!(value["kind"], "attributed_reply");
        assert_eq!(value["sender_id"], "alice");
        assert_eq!(value["text"], "fixed");
    }
}
