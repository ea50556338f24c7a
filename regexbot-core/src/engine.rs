// regexbot-core/src/engine.rs
//! Defines the `Rewriter` trait shared by the substitute and transliterate engines.
//!
//! A rewriter is a compiled command that can be applied to one history line at
//! a time. The bot scans history and asks the rewriter about each candidate,
//! newest first; the first line it rewrites wins.
//!
//! License: MIT OR APACHE 2.0

/// A compiled command applied to individual history lines.
///
/// Implementations must be cheap to share across threads: the cancellable
/// runtime moves an `Arc<dyn Rewriter>` into an isolated worker for each
/// attempt.
pub trait Rewriter: Send + Sync {
    /// Applies the command to `line`.
    ///
    /// Returns `Some(new_text)` when the line matches, `None` otherwise.
    fn rewrite(&self, line: &str) -> Option<String>;

    /// Whether a single `rewrite` call can run for an unbounded time and must
    /// be executed under the cancellable runtime.
    fn needs_supervision(&self) -> bool;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
