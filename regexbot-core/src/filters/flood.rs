// regexbot-core/src/filters/flood.rs
use std::collections::HashMap;
use chrono::{DateTime, Duration, Utc};
use log::info;

/// Global and per-channel cooldown tracker.
///
/// Every call to [`FloodController::allow`] records the attempt, whether or not
/// it is allowed, so cooldowns run from the most recent attempt.
#[derive(Debug, Clone)]
pub struct FloodController {
    channel_cooldown: Duration,
    global_cooldown: Duration,
    last_global: Option<DateTime<Utc>>,
    last_by_channel: HashMap<String, DateTime<Utc>>,
}

impl FloodController {
    pub fn new(channel_cooldown: Duration, global_cooldown: Duration) -> Self {
        Self {
            channel_cooldown,
            global_cooldown,
            last_global: None,
            last_by_channel: HashMap::new(),
        }
    }

    /// Returns true if an event in `channel` at `now` may be handled.
    pub fn allow(&mut self, channel: &str, now: DateTime<Utc>) -> bool {
        // a channel never seen before is measured against the last global event
        let global_delta = self.last_global.map(|last| now - last);
        let channel_delta = self
            .last_by_channel
            .get(channel)
            .copied()
            .or(self.last_global)
            .map(|last| now - last);

        self.last_global = Some(now);
        self.last_by_channel.insert(channel.to_string(), now);

        // think global
        if let Some(delta) = global_delta {
            if delta < self.global_cooldown {
                info!(
                    "Global flood protection hit, {} of {} seconds were waited",
                    delta.num_seconds(),
                    self.global_cooldown.num_seconds()
                );
                return false;
            }
        }

        // act local
        if let Some(delta) = channel_delta {
            if delta < self.channel_cooldown {
                info!(
                    "Local {} flood protection hit, {} of {} seconds were waited",
                    channel,
                    delta.num_seconds(),
                    self.channel_cooldown.num_seconds()
                );
                return false;
            }
        }

        true
    }

    pub fn last_event(&self, channel: &str) -> Option<DateTime<Utc>> {
        self.last_by_channel.get(channel).copied()
    }
}
