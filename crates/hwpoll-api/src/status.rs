//! Homework status codes and notification text.

use std::fmt;

use crate::error::{ApiError, Result};
use crate::response::Homework;

/// The closed set of status codes the review service reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    /// The reviewer accepted the work.
    Approved,
    /// The reviewer picked the work up for review.
    Reviewing,
    /// The reviewer returned the work with comments.
    Rejected,
}

impl HomeworkStatus {
    /// Parses a raw status code.
    ///
    /// Returns `None` for anything outside the known vocabulary; the
    /// caller decides whether that is an error (it always is during a
    /// poll cycle).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns the wire-format code for this status.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Returns the human-readable verdict for this status.
    #[must_use]
    pub const fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => {
                "The reviewer checked the work and liked everything. Hooray!"
            }
            Self::Reviewing => "The work was taken up for review.",
            Self::Rejected => "The reviewer checked the work and left comments.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Builds the notification text for one homework record.
///
/// A record missing its name or status is an error, never a valid
/// "nothing changed" signal; "no update" is detected by the poller
/// comparing rendered messages across cycles.
///
/// # Errors
///
/// - `ApiError::MissingHomeworkName` if the record has no name.
/// - `ApiError::MissingStatusField` if the record has no status.
/// - `ApiError::UnknownStatus` if the status code is unrecognized.
pub fn parse_status(homework: &Homework) -> Result<String> {
    let name = homework
        .homework_name
        .as_deref()
        .ok_or(ApiError::MissingHomeworkName)?;

    let code = homework
        .status
        .as_deref()
        .ok_or(ApiError::MissingStatusField)?;

    let status =
        HomeworkStatus::from_code(code).ok_or_else(|| ApiError::unknown_status(code))?;

    Ok(format!(
        "Review status changed for \"{name}\". {}",
        status.verdict()
    ))
}
