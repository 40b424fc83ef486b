//! Telegram notification delivery for hwpoll.
//!
//! Exposes the [`Messenger`] seam the poller sends through, plus the
//! real [`TelegramNotifier`] that posts to the Bot API. Delivery is
//! best-effort by design: the poller logs a failed send and moves on,
//! so errors here never need to be retried or escalated.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

/// A specialized `Result` type for notification delivery.
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Errors that can occur while delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The request to the bot API failed at the transport level, or the
    /// API answered with a non-success HTTP status.
    #[error("message delivery failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The bot API answered 2xx but reported `ok: false`.
    #[error("bot API rejected the message: {description}")]
    Rejected {
        /// The `description` field from the Bot API response.
        description: String,
    },
}

/// A destination for notification text.
///
/// The poller is generic over this trait so dedup and failure handling
/// can be tested with an in-memory recorder instead of a live chat.
#[async_trait]
pub trait Messenger {
    /// Sends `text` to the configured destination.
    async fn send(&self, text: &str) -> Result<()>;
}

/// Envelope every Bot API method call answers with.
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Sends text messages to one Telegram chat via the Bot API.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    http: reqwest::Client,
    send_message_url: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Creates a notifier for `chat_id` authenticating with `bot_token`.
    ///
    /// # Errors
    ///
    /// Returns `NotifyError::Transport` if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(
        bot_token: &str,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            send_message_url: format!("https://api.telegram.org/bot{bot_token}/sendMessage"),
            chat_id: chat_id.into(),
        })
    }

    /// Returns the destination chat identifier.
    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

#[async_trait]
impl Messenger for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        let response = self
            .http
            .post(&self.send_message_url)
            .form(&[("chat_id", self.chat_id.as_str()), ("text", text)])
            .send()
            .await?
            .error_for_status()?;

        let body: BotApiResponse = response.json().await?;
        if !body.ok {
            return Err(NotifyError::Rejected {
                description: body
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }

        tracing::info!(chat_id = %self.chat_id, "notification sent");
        Ok(())
    }
}
