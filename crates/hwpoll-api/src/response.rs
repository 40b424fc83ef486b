//! Structural validation of review API responses.
//!
//! Validation happens on the raw [`Value`] before any typed decoding so
//! that a missing key, a wrong-typed key, and an empty list each surface
//! as their own error rather than one opaque decode failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};

/// One homework record as the review API reports it.
///
/// Both fields are optional at the wire level; their absence is an error
/// reported by [`crate::status::parse_status`], never a "no update" signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Homework {
    /// Display name of the submission.
    pub homework_name: Option<String>,

    /// Raw status code, one of a small fixed vocabulary.
    pub status: Option<String>,
}

/// Validates the decoded response body and returns the homework records.
///
/// The most recent record comes first, as the API returns them.
///
/// # Errors
///
/// - `ApiError::MissingHomeworks` if the `homeworks` key is absent.
/// - `ApiError::HomeworksNotAList` if the key holds anything but an array.
/// - `ApiError::NoHomeworks` if the array is empty.
/// - `ApiError::Decode` if a record does not decode into [`Homework`].
pub fn check_response(body: &Value) -> Result<Vec<Homework>> {
    let homeworks = body.get("homeworks").ok_or(ApiError::MissingHomeworks)?;

    let items = homeworks
        .as_array()
        .ok_or(ApiError::HomeworksNotAList)?;

    if items.is_empty() {
        return Err(ApiError::NoHomeworks);
    }

    items
        .iter()
        .map(|item| serde_json::from_value(item.clone()).map_err(ApiError::from))
        .collect()
}

/// Extracts the server-side poll cursor from the response, if present.
///
/// The review API echoes the request time as `current_date`; the poller
/// uses it as the `from_date` lower bound for the next cycle.
#[must_use]
pub fn poll_cursor(body: &Value) -> Option<i64> {
    body.get("current_date").and_then(Value::as_i64)
}
