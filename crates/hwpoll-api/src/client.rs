//! HTTP client for the homework review API.
//!
//! One GET per poll cycle: the cursor timestamp goes in the `from_date`
//! query parameter, the API token in an `Authorization: OAuth <token>`
//! header. The body is decoded to [`serde_json::Value`] so the response
//! module can report shape problems precisely.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Production endpoint for homework statuses.
pub const DEFAULT_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// A source of raw homework-status responses.
///
/// The poller is generic over this trait so the control loop can be tested
/// against scripted responses without a network.
#[async_trait]
pub trait StatusSource {
    /// Fetches the decoded response body for records since `from_date`
    /// (integer epoch seconds).
    async fn poll(&self, from_date: i64) -> Result<Value>;
}

/// Client for the review service.
#[derive(Debug, Clone)]
pub struct ReviewApiClient {
    http: reqwest::Client,
    endpoint: String,
    auth_header: String,
}

impl ReviewApiClient {
    /// Creates a client for `endpoint` authenticating with `token`.
    ///
    /// The request timeout is explicit; the transport default is never
    /// relied on.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(
        endpoint: impl Into<String>,
        token: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            auth_header: format!("OAuth {token}"),
        })
    }

    /// Returns the endpoint this client polls.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StatusSource for ReviewApiClient {
    async fn poll(&self, from_date: i64) -> Result<Value> {
        tracing::debug!(endpoint = %self.endpoint, from_date, "fetching homework statuses");

        let response = self
            .http
            .get(&self.endpoint)
            .header(header::AUTHORIZATION, &self.auth_header)
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::bad_status(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}
