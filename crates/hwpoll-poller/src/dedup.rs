//! Notification deduplication.
//!
//! Status changes and failure messages are deduplicated independently,
//! each on its own channel, so a persistent fault cannot storm the chat
//! and an unchanged status never repeats.

/// Remembers the last accepted message on one notification channel.
///
/// A message is accepted when it differs from the previously accepted
/// one; a maximal run of identical consecutive messages is accepted
/// exactly once. State lives in process memory only and resets on
/// restart.
#[derive(Debug, Clone, Default)]
pub struct DedupChannel {
    last: Option<String>,
}

impl DedupChannel {
    /// Creates an empty channel; the first message is always accepted.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Accepts `message` if it differs from the last accepted message.
    ///
    /// Returns `true` and remembers the message on acceptance, `false`
    /// if it repeats the previous one.
    pub fn accept(&mut self, message: &str) -> bool {
        if self.last.as_deref() == Some(message) {
            return false;
        }
        self.last = Some(message.to_string());
        true
    }

    /// Returns the last accepted message, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}
