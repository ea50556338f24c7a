// regexbot/src/logger.rs
//! Logger initialisation for the regexbot binary.
//!
//! The library only emits through the `log` facade; this is the one place an
//! actual logger is installed. Logs go to stderr so stdout carries replies only.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Installs `env_logger`.
///
/// `RUST_LOG` is honoured unless `level` is given, in which case it wins.
/// Calling this more than once is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).format_timestamp_millis();
    let _ = builder.try_init();
}
