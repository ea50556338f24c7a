//! ignore.rs - Compiles and evaluates the sender ignore list.
//!
//! The list is compiled once, at bot construction. A pattern that does not
//! compile is a configuration error and prevents the bot from starting.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::IgnoreRuleConfig;
use crate::errors::RegexBotError;

/// A compiled ignore rule.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pub label: String,
    pub pattern: Regex,
}

/// Ordered, immutable set of ignore rules.
#[derive(Debug, Clone, Default)]
pub struct IgnoreFilter {
    rules: Vec<IgnoreRule>,
}

impl IgnoreFilter {
    /// Compiles every rule case-insensitively, keeping configured order.
    pub fn compile(rules: &[IgnoreRuleConfig]) -> Result<Self, RegexBotError> {
        debug!("Compiling {} ignore rules.", rules.len());
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let pattern = RegexBuilder::new(&rule.pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| RegexBotError::IgnoreRuleCompilationError(rule.label.clone(), e))?;
            compiled.push(IgnoreRule {
                label: rule.label.clone(),
                pattern,
            });
        }
        Ok(Self { rules: compiled })
    }

    /// Returns the first rule matching `sender_id`. Later rules are not evaluated.
    pub fn matching_rule(&self, sender_id: &str) -> Option<&IgnoreRule> {
        self.rules.iter().find(|rule| rule.pattern.is_match(sender_id))
    }

    pub fn is_ignored(&self, sender_id: &str) -> bool {
        self.matching_rule(sender_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
