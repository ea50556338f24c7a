//! errors.rs - Custom error types for the regexbot-core library.
//!
//! Two families live here. `RegexBotError` covers faults of the library
//! itself (bad configuration, I/O), which are fatal at startup. `CommandError`
//! covers everything a chat user can get wrong; its `Display` output is the
//! exact text that is sent back to the channel.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// Library-level failures.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RegexBotError {
    #[error("Failed to compile ignore rule '{0}': {1}")]
    IgnoreRuleCompilationError(String, regex::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}

/// A user-facing failure while handling a substitute or transliterate command.
///
/// These never propagate to the transport as faults. The bot renders them as a
/// reply that mentions the requesting sender.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("message buffer is empty")]
    EmptyBuffer,

    #[error("invalid expression, you forgot the trailing separator, dummy")]
    MissingTrailingSeparator,

    #[error("invalid expression, not the right amount of separators")]
    WrongSeparatorCount,

    #[error("original string is empty")]
    EmptyOriginal,

    #[error("Translation is different length!")]
    TranslationLengthMismatch,

    #[error("failure compiling regular expression: {0}")]
    PatternCompilation(String),

    #[error("disallowed control character")]
    DisallowedControlCharacter,
}
