//! Error types for review API operations.
//!
//! Every failure a poll cycle can hit on the API side is a distinct
//! variant here, so the poller can log and relay a precise message
//! instead of a catch-all.

/// A specialized `Result` type for review API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while fetching and interpreting homework statuses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // ========================================================================
    // Fetch errors
    // ========================================================================
    /// The request never produced a usable response (DNS, connect, timeout,
    /// or body read failure).
    #[error("request to the review API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered, but not with a success status.
    #[error("review API answered with HTTP {status}")]
    BadStatus {
        /// The HTTP status code received.
        status: u16,
    },

    // ========================================================================
    // Response shape errors
    // ========================================================================
    /// The response body has no `homeworks` key.
    #[error("response has no 'homeworks' field")]
    MissingHomeworks,

    /// The `homeworks` key is present but is not a JSON array.
    #[error("'homeworks' field is not a list")]
    HomeworksNotAList,

    /// The homework list is present but empty.
    #[error("homework list is empty")]
    NoHomeworks,

    /// A homework record could not be decoded into the expected shape.
    #[error("failed to decode homework record: {0}")]
    Decode(#[from] serde_json::Error),

    // ========================================================================
    // Record errors
    // ========================================================================
    /// The homework record carries no name.
    #[error("homework record has no name")]
    MissingHomeworkName,

    /// The homework record carries no status field.
    #[error("homework record has no status")]
    MissingStatusField,

    /// The status code is outside the known vocabulary.
    #[error("unknown homework status '{code}'")]
    UnknownStatus {
        /// The unrecognized status code as received.
        code: String,
    },
}

impl ApiError {
    /// Creates a new `BadStatus` error.
    #[must_use]
    pub const fn bad_status(status: u16) -> Self {
        Self::BadStatus { status }
    }

    /// Creates a new `UnknownStatus` error.
    #[must_use]
    pub fn unknown_status(code: impl Into<String>) -> Self {
        Self::UnknownStatus { code: code.into() }
    }

    /// Returns `true` if this error is transient and the next poll may
    /// succeed without any change on our side.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::BadStatus { status: 500..=599 }
        )
    }
}
