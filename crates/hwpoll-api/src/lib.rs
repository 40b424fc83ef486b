//! Review API client for hwpoll.
//!
//! Fetches homework statuses from the review service, validates the
//! response shape, and renders status codes into notification text.

pub mod client;
pub mod error;
pub mod response;
pub mod status;

pub use client::{ReviewApiClient, StatusSource, DEFAULT_ENDPOINT};
pub use error::{ApiError, Result};
pub use response::{check_response, poll_cursor, Homework};
pub use status::{parse_status, HomeworkStatus};
