// regexbot-core/src/engines/regex_engine.rs
//! A `Rewriter` implementation for the substitute (`s`) command.
//!
//! Patterns come straight from chat, so compilation is size-limited and every
//! attempt is run under the cancellable runtime. The replacement template is
//! handed to the regex crate unmodified, so capture groups use its `$1` /
//! `${name}` syntax.
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::engine::Rewriter;
use crate::errors::CommandError;

/// Upper bound for the compiled program of a user-supplied pattern.
pub const PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);
/// Upper bound for the lazy DFA cache of a user-supplied pattern.
pub const DFA_SIZE_LIMIT: usize = 2 * (1 << 20);

#[derive(Debug, Clone)]
pub struct SubstituteRewriter {
    regex: Regex,
    replacement: String,
}

impl SubstituteRewriter {
    /// Compiles `pattern`. Compile errors are reported back to the user.
    pub fn compile(pattern: &str, replacement: &str, ignore_case: bool) -> Result<Self, CommandError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .size_limit(PATTERN_SIZE_LIMIT)
            .dfa_size_limit(DFA_SIZE_LIMIT)
            .build()
            .map_err(|e| CommandError::PatternCompilation(e.to_string()))?;
        debug!(
            target: "regexbot_core::engine",
            "Compiled pattern '{}' (ignore_case: {}).",
            pattern,
            ignore_case
        );
        Ok(Self {
            regex,
            replacement: replacement.to_string(),
        })
    }
}

impl Rewriter for SubstituteRewriter {
    fn rewrite(&self, line: &str) -> Option<String> {
        if !self.regex.is_match(line) {
            return None;
        }
        Some(self.regex.replace_all(line, self.replacement.as_str()).into_owned())
    }

    fn needs_supervision(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "substitute"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_every_occurrence() {
        let r = SubstituteRewriter::compile("o", "0", false).unwrap();
        assert_eq!(r.rewrite("foo boo").as_deref(), Some("f00 b00"));
    }

    #[test]
    fn test_no_match_returns_none() {
        let r = SubstituteRewriter::compile("xyz", "abc", false).unwrap();
        assert_eq!(r.rewrite("hello"), None);
    }

    #[test]
    fn test_match_with_identical_output_still_counts() {
        let r = SubstituteRewriter::compile("a", "a", false).unwrap();
        assert_eq!(r.rewrite("banana").as_deref(), Some("banana"));
    }

    #[test]
    fn test_ignore_case_flag() {
        let strict = SubstituteRewriter::compile("hello", "bye", false).unwrap();
        let loose = SubstituteRewriter::compile("hello", "bye", true).unwrap();
        assert_eq!(strict.rewrite("HELLO world"), None);
        assert_eq!(loose.rewrite("HELLO world").as_deref(), Some("bye world"));
    }

    #[test]
    fn test_capture_groups_use_native_syntax() {
        let r = SubstituteRewriter::compile(r"(\w+) (\w+)", "$2 $1", false).unwrap();
        assert_eq!(r.rewrite("hello world").as_deref(), Some("world hello"));
    }

    #[test]
    fn test_compile_error_is_a_user_error() {
        match SubstituteRewriter::compile("(unclosed", "", false) {
            Err(CommandError::PatternCompilation(detail)) => assert!(!detail.is_empty()),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_backreferences_are_rejected_at_compile_time() {
        assert!(SubstituteRewriter::compile(r"(a)\1", "", false).is_err());
    }
}
