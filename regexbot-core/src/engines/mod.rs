// regexbot-core/src/engines/mod.rs
//! Concrete implementations of the `Rewriter` trait.
//!
//! * `regex_engine`: the `s` command, a regex search and replace-all.
//! * `translate_engine`: the `y` command, a fixed-length character mapping.
//!
//! # License
//! MIT OR APACHE 2.0

pub mod regex_engine;
pub mod translate_engine;
