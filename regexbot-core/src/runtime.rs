// regexbot-core/src/runtime.rs
//! Deadline-bounded execution of a single rewrite attempt.
//!
//! Each attempt runs on its own blocking worker. The supervisor waits for at
//! most one time slice; if the worker has not finished by then, the attempt is
//! reported as [`AttemptOutcome::Aborted`] and the worker is detached. The
//! worker only ever writes to its own join slot, which is dropped unread once
//! detached, so a late worker cannot touch bot state.
//!
//! The regex crate guarantees matching time linear in the input, and inputs
//! are capped at `max_message_size`, so a detached worker always finishes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{error, warn};

use crate::engine::Rewriter;

/// Outcome of one supervised attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Matched(String),
    NoMatch,
    Aborted,
}

#[derive(Debug, Clone)]
pub struct MatchRuntime {
    attempt_timeout: Duration,
}

impl MatchRuntime {
    pub fn new(attempt_timeout: Duration) -> Self {
        Self { attempt_timeout }
    }

    /// Runs `rewriter` against `input` on an isolated worker, waiting at most
    /// one time slice for it.
    pub async fn try_match_and_replace(&self, rewriter: Arc<dyn Rewriter>, input: String) -> AttemptOutcome {
        let abandoned = Arc::new(AtomicBool::new(false));
        let worker_abandoned = Arc::clone(&abandoned);
        let name = rewriter.name();

        let mut worker = tokio::task::spawn_blocking(move || {
            // the blocking pool may start us after the supervisor gave up
            if worker_abandoned.load(Ordering::Acquire) {
                return None;
            }
            rewriter.rewrite(&input)
        });

        match tokio::time::timeout(self.attempt_timeout, &mut worker).await {
            Ok(Ok(Some(text))) => AttemptOutcome::Matched(text),
            Ok(Ok(None)) => AttemptOutcome::NoMatch,
            Ok(Err(e)) => {
                error!("{} worker failed: {}", name, e);
                AttemptOutcome::NoMatch
            }
            Err(_) => {
                abandoned.store(true, Ordering::Release);
                worker.abort();
                warn!(
                    "{} attempt exceeded {} ms, worker detached",
                    name,
                    self.attempt_timeout.as_millis()
                );
                AttemptOutcome::Aborted
            }
        }
    }
}
