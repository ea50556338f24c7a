// regexbot/src/lib.rs
//! # regexbot console application
//!
//! This crate wires `regexbot-core` to the terminal: a line-oriented console
//! transport (`run`) and a one-shot evaluator (`eval`).

pub mod cli;
pub mod commands;
pub mod console;
pub mod logger;

pub use commands::eval::run_eval;
pub use commands::run::{run_console, RunOptions};
