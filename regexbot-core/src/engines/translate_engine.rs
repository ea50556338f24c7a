// regexbot-core/src/engines/translate_engine.rs
//! A `Rewriter` implementation for the transliterate (`y`) command.
//!
//! The mapping is code point to code point. If a character appears more than
//! once in the source set, its last occurrence decides the mapping. The work
//! is linear in the line length, so it runs inline without supervision.

use std::collections::HashMap;

use crate::engine::Rewriter;
use crate::errors::CommandError;

#[derive(Debug, Clone)]
pub struct TranslateRewriter {
    table: HashMap<char, char>,
}

impl TranslateRewriter {
    pub fn new(from_set: &str, to_set: &str) -> Result<Self, CommandError> {
        if from_set.is_empty() {
            return Err(CommandError::EmptyOriginal);
        }
        if from_set.chars().count() != to_set.chars().count() {
            return Err(CommandError::TranslationLengthMismatch);
        }
        let table = from_set.chars().zip(to_set.chars()).collect();
        Ok(Self { table })
    }

    pub fn translate(&self, line: &str) -> String {
        line.chars()
            .map(|c| self.table.get(&c).copied().unwrap_or(c))
            .collect()
    }
}

impl Rewriter for TranslateRewriter {
    /// Matches only when the mapping changes the line.
    fn rewrite(&self, line: &str) -> Option<String> {
        let translated = self.translate(line);
        (translated != line).then_some(translated)
    }

    fn needs_supervision(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "translate"
    }
}
