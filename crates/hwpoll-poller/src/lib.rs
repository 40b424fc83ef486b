//! hwpoll control loop.
//!
//! Ties the review API client and the notifier together: fetch,
//! validate, extract, compare-and-notify, sleep, repeat. Holds the
//! in-memory dedup state that keeps an unchanged status or a repeating
//! failure from producing duplicate messages.

pub mod config;
pub mod cycle;
pub mod dedup;

pub use config::{Config, ConfigError};
pub use cycle::{CycleOutcome, Poller};
pub use dedup::DedupChannel;
