//! Classification of raw chat text into plain lines, mentions and commands.
//!
//! Two command forms are recognised:
//!
//! * `s<sep>pattern<sep>replacement<sep>flags`: regex substitution. The only
//!   flag honoured is `i` (case-insensitive).
//! * `y<sep>from<sep>to<sep>`: character transliteration.
//!
//! `<sep>` must be the second character of the line and one of
//! [`SEPARATORS`]. A line that merely starts with `s` or `y` is ordinary text.
//! Malformed commands come back as [`ParsedMessage::Invalid`] and are never
//! raised as faults.

use crate::errors::CommandError;

/// Characters accepted as command separators.
pub const SEPARATORS: [char; 7] = ['@', '#', '%', ':', ';', '/', '\u{e1}'];

/// A well-formed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Substitute {
        separator: char,
        original: String,
        replacement: String,
        ignore_case: bool,
    },
    Translate {
        separator: char,
        from_set: String,
        to_set: String,
    },
}

/// Result of classifying one line of chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMessage {
    PlainText,
    Mention,
    Command(Command),
    Invalid(CommandError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Substitute,
    Translate,
}

#[derive(Debug, Clone)]
pub struct CommandParser {
    bot_name: String,
}

impl CommandParser {
    /// `bot_name` is the display name used for mention detection; an empty
    /// name disables it.
    pub fn new(bot_name: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
        }
    }

    pub fn parse(&self, text: &str) -> ParsedMessage {
        if !self.bot_name.is_empty() && text.starts_with(&self.bot_name) {
            return ParsedMessage::Mention;
        }

        let mut chars = text.chars();
        let kind = match chars.next() {
            Some('s') => CommandKind::Substitute,
            Some('y') => CommandKind::Translate,
            _ => return ParsedMessage::PlainText,
        };
        let separator = match chars.next() {
            Some(c) if SEPARATORS.contains(&c) => c,
            _ => return ParsedMessage::PlainText,
        };

        let parts: Vec<&str> = text.split(separator).collect();
        match parts.len() {
            4 => {}
            3 => return ParsedMessage::Invalid(CommandError::MissingTrailingSeparator),
            _ => return ParsedMessage::Invalid(CommandError::WrongSeparatorCount),
        }

        let (original, replacement, flags) = (parts[1], parts[2], parts[3]);
        if original.is_empty() {
            return ParsedMessage::Invalid(CommandError::EmptyOriginal);
        }

        let command = match kind {
            CommandKind::Substitute => Command::Substitute {
                separator,
                original: original.to_string(),
                replacement: replacement.to_string(),
                ignore_case: flags.contains('i'),
            },
            CommandKind::Translate => {
                if original.chars().count() != replacement.chars().count() {
                    return ParsedMessage::Invalid(CommandError::TranslationLengthMismatch);
                }
                Command::Translate {
                    separator,
                    from_set: original.to_string(),
                    to_set: replacement.to_string(),
                }
            }
        };
        ParsedMessage::Command(command)
    }
}
