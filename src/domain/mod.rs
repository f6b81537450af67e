//! Domain module containing core business logic and data types
//!
//! This module defines the core entities (User, Habit, HabitLog, MoodEntry),
//! their validation rules, and the streak engine that ties logs back to the
//! user profile.

pub mod clock;
pub mod habit;
pub mod log;
pub mod mood;
pub mod streak;
pub mod types;
pub mod user;

// Re-export public types for easy access
pub use clock::*;
pub use habit::*;
pub use log::*;
pub use mood::*;
pub use streak::*;
pub use types::*;
pub use user::*;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Invalid progress: {0}")]
    InvalidProgress(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid value for {field}: '{value}'")]
    UnknownVariant { field: &'static str, value: String },
}

/// Parse a calendar day in `YYYY-MM-DD` form
///
/// Every date that enters through a tool goes through here, so malformed
/// dates never reach storage or the streak engine.
pub fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    let trimmed = s.trim();
    // chrono accepts unpadded fields, the wire format does not
    if trimmed.len() != 10 {
        return Err(DomainError::InvalidDate(format!(
            "'{}' must be in YYYY-MM-DD format",
            s
        )));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        DomainError::InvalidDate(format!("'{}' must be in YYYY-MM-DD format", s))
    })
}

/// Validate optional free-text notes (shared by logs and moods)
pub(crate) fn validate_notes(notes: &Option<String>) -> Result<(), DomainError> {
    if let Some(text) = notes {
        if text.chars().count() > 500 {
            return Err(DomainError::Validation {
                message: "Notes cannot be longer than 500 characters".to_string(),
            });
        }
    }
    Ok(())
}

/// Trim notes and drop them entirely when blank
pub(crate) fn clean_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}
