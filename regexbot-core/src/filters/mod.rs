//! Gates that decide whether an inbound command is handled at all.
//!
//! * `ignore`: the configured sender ignore list.
//! * `flood`: global and per-channel cooldown tracking.
//!
//! Both filters stay silent towards the chat when they reject an event; only
//! the log records why.

pub mod flood;
pub mod ignore;
