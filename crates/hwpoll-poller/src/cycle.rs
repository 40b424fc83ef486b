//! The poll cycle and its run loop.
//!
//! Each cycle walks Fetching -> Validating -> Extracting ->
//! (Unchanged | Notifying); the loop adds Sleeping and repeats forever.
//! [`Poller::tick`] performs exactly one cycle with no sleeping so the
//! whole state machine is testable without wall-clock delay;
//! [`Poller::run`] owns the timer and Ctrl-C handling.

use std::time::Duration;

use hwpoll_api::{check_response, parse_status, poll_cursor, ApiError, StatusSource};
use hwpoll_notify::Messenger;
use tokio::time::MissedTickBehavior;

use crate::dedup::DedupChannel;

/// What one poll cycle did.
///
/// Errors never escape a cycle; they are folded into
/// [`CycleOutcome::Failed`] so the loop can keep running unattended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The status message changed and a send was attempted. Transport
    /// failures during the send are logged and swallowed.
    Notified(String),

    /// The rendered status message matched the previous cycle; nothing
    /// was sent.
    Unchanged,

    /// The cycle failed. `notified` is `true` when the failure message
    /// differed from the last relayed failure and a send was attempted.
    Failed {
        /// The human-readable failure message.
        message: String,
        /// Whether the failure was relayed to the chat.
        notified: bool,
    },
}

impl CycleOutcome {
    /// Returns `true` if the cycle failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// The polling state machine.
///
/// Generic over its two seams so tests can script responses and record
/// sends in memory. All state (cursor, dedup channels) lives here and
/// is discarded at process exit.
#[derive(Debug)]
pub struct Poller<S, M> {
    source: S,
    messenger: M,
    cursor: i64,
    status_channel: DedupChannel,
    error_channel: DedupChannel,
}

impl<S, M> Poller<S, M>
where
    S: StatusSource + Send + Sync,
    M: Messenger + Send + Sync,
{
    /// Creates a poller starting from the given cursor timestamp.
    pub fn new(source: S, messenger: M, cursor: i64) -> Self {
        Self {
            source,
            messenger,
            cursor,
            status_channel: DedupChannel::new(),
            error_channel: DedupChannel::new(),
        }
    }

    /// Returns the current poll cursor (epoch seconds).
    #[must_use]
    pub const fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Returns the messenger this poller sends through.
    #[must_use]
    pub const fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Performs exactly one poll cycle.
    ///
    /// Fetches, validates, and extracts the most recent record, then
    /// notifies if the rendered message changed. Every error is caught
    /// here, logged, relayed once per distinct failure message, and
    /// folded into the returned outcome.
    pub async fn tick(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(message) => {
                if self.status_channel.accept(&message) {
                    tracing::info!(%message, "status changed");
                    self.dispatch(&message).await;
                    CycleOutcome::Notified(message)
                } else {
                    tracing::debug!("no updates");
                    CycleOutcome::Unchanged
                }
            }
            Err(err) => {
                let message = format!("Bot cycle failed: {err}");
                tracing::error!(
                    error = %err,
                    transient = err.is_transient(),
                    "poll cycle failed"
                );
                // The channel is updated even if the send below drops,
                // so a persistent fault is relayed at most once
                let notified = self.error_channel.accept(&message);
                if notified {
                    self.dispatch(&message).await;
                }
                CycleOutcome::Failed { message, notified }
            }
        }
    }

    /// Runs the loop until Ctrl-C.
    ///
    /// The first cycle runs immediately; after that the interval is the
    /// sole backoff mechanism, for failures as much as for quiet cycles.
    pub async fn run(mut self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("received Ctrl-C, shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }
    }

    /// Fetch -> validate -> extract for the most recent record.
    async fn poll_once(&mut self) -> Result<String, ApiError> {
        let body = self.source.poll(self.cursor).await?;
        let homeworks = check_response(&body)?;

        if let Some(next) = poll_cursor(&body) {
            self.cursor = next;
        }

        let latest = homeworks.into_iter().next().ok_or(ApiError::NoHomeworks)?;
        parse_status(&latest)
    }

    /// Best-effort send: delivery failures are logged and swallowed.
    async fn dispatch(&self, text: &str) {
        if let Err(err) = self.messenger.send(text).await {
            tracing::warn!(error = %err, "notification delivery failed");
        }
    }
}
