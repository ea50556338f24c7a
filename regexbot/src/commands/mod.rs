//! Subcommand implementations for the regexbot binary.

pub mod eval;
pub mod run;
