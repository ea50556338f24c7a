//! Configuration management for `regexbot-core`.
//!
//! This module defines the bot configuration: flood cooldowns, history limits,
//! evaluation budgets and the sender ignore list. It handles YAML
//! deserialization and validates values before a bot is ever built from them.
//! Configuration is handed to the bot wholesale and never mutated afterwards.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::errors::RegexBotError;

/// Longest cooldown accepted, in seconds (one week).
pub const MAX_COOLDOWN_SECS: u64 = 7 * 24 * 60 * 60;

/// Longest scan budget accepted, in seconds (one hour).
pub const MAX_SCAN_TIMEOUT_SECS: u64 = 60 * 60;

/// A single entry of the sender ignore list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct IgnoreRuleConfig {
    /// Name used in logs when the rule fires.
    pub label: String,
    /// Case-insensitive pattern tested against the sender identifier.
    pub pattern: String,
}

impl IgnoreRuleConfig {
    pub fn new(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
        }
    }
}

/// Top-level configuration for a regexbot instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    /// Display name of the bot. Lines starting with it are mentions.
    pub bot_name: String,
    /// Free-form version/info string used in the help reply.
    pub version: String,
    /// Seconds between handled commands within one channel.
    pub channel_flood_cooldown: u64,
    /// Seconds between handled commands across every channel.
    pub global_flood_cooldown: u64,
    /// Lines of history kept per channel.
    pub max_messages: usize,
    /// Longest line kept or emitted, in characters.
    pub max_message_size: usize,
    /// Time slice for one regex attempt against one history line.
    pub attempt_timeout_ms: u64,
    /// Budget for a whole newest-to-oldest scan.
    pub scan_timeout_secs: u64,
    /// Ordered sender ignore list.
    pub ignore: Vec<IgnoreRuleConfig>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_name: "regexbot".to_string(),
            version: "regexbot; https://github.com/micolous/slackbots/".to_string(),
            channel_flood_cooldown: 5,
            global_flood_cooldown: 1,
            max_messages: 25,
            max_message_size: 200,
            attempt_timeout_ms: 100,
            scan_timeout_secs: 10,
            ignore: vec![IgnoreRuleConfig::new("slackbot", "^USLACKBOT$")],
        }
    }
}

impl BotConfig {
    /// Loads a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;

        info!(
            "Loaded configuration from {} ({} ignore rules).",
            path.display(),
            config.ignore.len()
        );
        Ok(config)
    }

    /// Loads the embedded default configuration.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        Self::from_yaml_str(default_yaml).context("Failed to parse default configuration")
    }

    /// Parses and validates a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: BotConfig = serde_yml::from_str(text).context("Failed to parse YAML")?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value the bot relies on.
    pub fn validate(&self) -> Result<(), RegexBotError> {
        let mut errors = Vec::new();

        if self.max_messages == 0 {
            errors.push("`max_messages` must be at least 1.".to_string());
        }
        if self.max_message_size == 0 {
            errors.push("`max_message_size` must be at least 1.".to_string());
        }
        if self.attempt_timeout_ms == 0 {
            errors.push("`attempt_timeout_ms` must be at least 1.".to_string());
        }
        if self.scan_timeout_secs == 0 {
            errors.push("`scan_timeout_secs` must be at least 1.".to_string());
        } else if self.scan_timeout_secs > MAX_SCAN_TIMEOUT_SECS {
            errors.push(format!(
                "`scan_timeout_secs` ({}) exceeds the maximum of {} seconds.",
                self.scan_timeout_secs, MAX_SCAN_TIMEOUT_SECS
            ));
        }
        for (name, value) in [
            ("channel_flood_cooldown", self.channel_flood_cooldown),
            ("global_flood_cooldown", self.global_flood_cooldown),
        ] {
            if value > MAX_COOLDOWN_SECS {
                errors.push(format!(
                    "`{}` ({}) exceeds the maximum of {} seconds.",
                    name, value, MAX_COOLDOWN_SECS
                ));
            }
        }

        let mut labels = HashSet::new();
        for rule in &self.ignore {
            if rule.label.is_empty() {
                errors.push("An ignore rule has an empty `label` field.".to_string());
            } else if !labels.insert(rule.label.as_str()) {
                errors.push(format!("Duplicate ignore rule label found: '{}'.", rule.label));
            }
            if let Err(e) = RegexBuilder::new(&rule.pattern).case_insensitive(true).build() {
                return Err(RegexBotError::IgnoreRuleCompilationError(rule.label.clone(), e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(RegexBotError::InvalidConfig(errors.join("\n")))
        }
    }

    pub fn channel_cooldown(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.channel_flood_cooldown.min(MAX_COOLDOWN_SECS) as i64)
    }

    pub fn global_cooldown(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.global_flood_cooldown.min(MAX_COOLDOWN_SECS) as i64)
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scan_timeout_secs.min(MAX_SCAN_TIMEOUT_SECS))
    }

    /// Version string shown in the help reply, suffixed with the crate version.
    pub fn version_banner(&self) -> String {
        format!("{}; {}", self.version, env!("CARGO_PKG_VERSION"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_matches_struct_default() {
        let loaded = BotConfig::load_default().unwrap();
        assert_eq!(loaded, BotConfig::default());
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config = BotConfig::from_yaml_str("max_messages: 3\n").unwrap();
        assert_eq!(config.max_messages, 3);
        assert_eq!(config.max_message_size, 200);
        assert_eq!(config.channel_cooldown(), chrono::Duration::seconds(5));
        assert_eq!(config.attempt_timeout(), Duration::from_millis(100));
        assert_eq!(config.ignore, vec![IgnoreRuleConfig::new("slackbot", "^USLACKBOT$")]);
    }

    #[test]
    fn test_explicit_empty_ignore_list_is_kept() {
        let config = BotConfig::from_yaml_str("ignore: []\n").unwrap();
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_zero_scan_timeout_is_rejected() {
        let config = BotConfig {
            scan_timeout_secs: 0,
            ..BotConfig::default()
        };
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("`scan_timeout_secs` must be at least 1"));
    }

    #[test]
    fn test_huge_scan_timeout_is_rejected() {
        let config = BotConfig {
            scan_timeout_secs: u64::MAX,
            ..BotConfig::default()
        };
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("scan_timeout_secs"));
        assert!(msg.contains("exceeds the maximum"));

        let config = BotConfig {
            scan_timeout_secs: MAX_SCAN_TIMEOUT_SECS,
            ..BotConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let config = BotConfig {
            max_messages: 0,
            max_message_size: 0,
            ..BotConfig::default()
        };
        let err = config.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("max_messages"));
        assert!(msg.contains("max_message_size"));
    }

    #[test]
    fn test_bad_ignore_pattern_is_fatal() {
        let config = BotConfig {
            ignore: vec![IgnoreRuleConfig::new("broken", "(unclosed")],
            ..BotConfig::default()
        };
        match config.validate() {
            Err(RegexBotError::IgnoreRuleCompilationError(label, _)) => assert_eq!(label, "broken"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ignore_labels_are_rejected() {
        let config = BotConfig {
            ignore: vec![
                IgnoreRuleConfig::new("dup", "a"),
                IgnoreRuleConfig::new("dup", "b"),
            ],
            ..BotConfig::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("Duplicate"));
    }
}
