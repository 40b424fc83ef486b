//! Bot configuration.
//!
//! All settings come from the environment (with `.env` support), are
//! read exactly once at startup into an explicit [`Config`], and are
//! passed by reference from there on. Nothing reads the environment
//! inside request logic.

use std::env;
use std::time::Duration;

use hwpoll_api::DEFAULT_ENDPOINT;

/// A specialized `Result` type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Default poll interval in seconds.
const fn default_poll_interval_secs() -> u64 {
    600
}

/// Default per-request HTTP timeout in seconds.
const fn default_http_timeout_secs() -> u64 {
    10
}

/// Runtime configuration for the bot.
///
/// The three token/identifier fields are required secrets; everything
/// else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the review API.
    pub api_token: String,

    /// Telegram Bot API token.
    pub bot_token: String,

    /// Destination chat identifier.
    pub chat_id: String,

    /// Review API endpoint URL.
    pub endpoint: String,

    /// Delay between poll cycles.
    pub poll_interval: Duration,

    /// Per-request HTTP timeout for both the review API and the bot API.
    pub http_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Reads a `.env` file from the working directory first if one
    /// exists. Required variables: `REVIEW_API_TOKEN`,
    /// `TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID`. Optional:
    /// `REVIEW_API_ENDPOINT`, `POLL_INTERVAL_SECS`, `HTTP_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first missing required
    /// variable, or an invalid-value error for unparseable durations.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_token =
            env::var("REVIEW_API_TOKEN").map_err(|_| ConfigError::MissingApiToken)?;

        let bot_token =
            env::var("TELEGRAM_BOT_TOKEN").map_err(|_| ConfigError::MissingBotToken)?;

        let chat_id =
            env::var("TELEGRAM_CHAT_ID").map_err(|_| ConfigError::MissingChatId)?;

        let endpoint = env::var("REVIEW_API_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let poll_interval = duration_var("POLL_INTERVAL_SECS", default_poll_interval_secs())?;
        let http_timeout = duration_var("HTTP_TIMEOUT_SECS", default_http_timeout_secs())?;

        let config = Self {
            api_token,
            bot_token,
            chat_id,
            endpoint,
            poll_interval,
            http_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// The secrets must be non-blank and the durations non-zero. A
    /// variable that is set but empty counts as missing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` describing the first failed check.
    pub fn validate(&self) -> Result<()> {
        if self.api_token.trim().is_empty() {
            return Err(ConfigError::invalid(
                "REVIEW_API_TOKEN is empty",
                "Provide the review API token in the environment or .env file",
            ));
        }

        if self.bot_token.trim().is_empty() {
            return Err(ConfigError::invalid(
                "TELEGRAM_BOT_TOKEN is empty",
                "Provide the bot token issued by @BotFather",
            ));
        }

        if self.chat_id.trim().is_empty() {
            return Err(ConfigError::invalid(
                "TELEGRAM_CHAT_ID is empty",
                "Provide the numeric chat identifier the bot should post to",
            ));
        }

        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::invalid(
                "REVIEW_API_ENDPOINT is empty",
                "Provide a URL or unset the variable to use the default endpoint",
            ));
        }

        if self.poll_interval.is_zero() {
            return Err(ConfigError::invalid(
                "POLL_INTERVAL_SECS must be greater than 0",
                "Set POLL_INTERVAL_SECS to at least 1 second",
            ));
        }

        if self.http_timeout.is_zero() {
            return Err(ConfigError::invalid(
                "HTTP_TIMEOUT_SECS must be greater than 0",
                "Set HTTP_TIMEOUT_SECS to at least 1 second",
            ));
        }

        Ok(())
    }
}

/// Reads an optional duration variable given in whole seconds.
fn duration_var(name: &'static str, default_secs: u64) -> Result<Duration> {
    match env::var(name) {
        Ok(raw) => {
            let secs = raw
                .parse::<u64>()
                .map_err(|_| ConfigError::invalid_duration(name, raw))?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}

/// Errors that can occur while loading configuration.
///
/// Any of these is fatal at startup; the process must not reach the
/// poll loop without a complete configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `REVIEW_API_TOKEN` is not set.
    #[error("REVIEW_API_TOKEN environment variable not set")]
    MissingApiToken,

    /// `TELEGRAM_BOT_TOKEN` is not set.
    #[error("TELEGRAM_BOT_TOKEN environment variable not set")]
    MissingBotToken,

    /// `TELEGRAM_CHAT_ID` is not set.
    #[error("TELEGRAM_CHAT_ID environment variable not set")]
    MissingChatId,

    /// A duration variable did not parse as whole seconds.
    #[error("{name} must be a whole number of seconds, got '{value}'")]
    InvalidDuration {
        /// The variable name.
        name: &'static str,
        /// The raw value as read from the environment.
        value: String,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration: {message}\n\nSuggestion: {suggestion}")]
    Invalid {
        /// Description of the failed check.
        message: String,
        /// Actionable suggestion for the operator.
        suggestion: String,
    },
}

impl ConfigError {
    /// Creates a new `Invalid` error with the given message and suggestion.
    #[must_use]
    pub fn invalid(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Creates a new `InvalidDuration` error.
    #[must_use]
    pub fn invalid_duration(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidDuration {
            name,
            value: value.into(),
        }
    }
}
