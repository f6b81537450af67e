//! User profile entity
//!
//! A user owns habits, logs and moods, and carries the cached streak values
//! that the log workflow refreshes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, UserId};

/// A registered user and their cached streak counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Stored lower-cased; unique across users
    pub email: String,
    /// Consecutive fully-completed days, as last computed
    pub current_streak: u32,
    /// High-water mark of `current_streak`; never decreases
    pub longest_streak: u32,
    /// When a log write last completed one of this user's habits
    pub last_completion_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with validation
    pub fn new(name: String, email: String) -> Result<Self, DomainError> {
        let name = Self::validate_name(&name)?;
        let email = Self::normalize_email(&email)?;

        Ok(Self {
            id: UserId::new(),
            name,
            email,
            current_streak: 0,
            longest_streak: 0,
            last_completion_at: None,
            created_at: Utc::now(),
        })
    }

    /// Rename the user
    pub fn rename(&mut self, name: String) -> Result<(), DomainError> {
        self.name = Self::validate_name(&name)?;
        Ok(())
    }

    /// Store a freshly computed streak
    ///
    /// `longest_streak` only ever moves up, so `longest_streak >=
    /// current_streak` holds after every call.
    pub fn record_streak(&mut self, current: u32) {
        self.current_streak = current;
        self.longest_streak = self.longest_streak.max(current);
    }

    fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidName("Name cannot be empty".to_string()));
        }
        if trimmed.chars().count() > 100 {
            return Err(DomainError::InvalidName(
                "Name cannot be longer than 100 characters".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }

    fn normalize_email(email: &str) -> Result<String, DomainError> {
        let email = email.trim().to_lowercase();
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain
                        .split_once('.')
                        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            }
            None => false,
        };

        if !valid {
            return Err(DomainError::InvalidEmail(format!(
                "'{}' is not a valid email address",
                email
            )));
        }
        Ok(email)
    }
}
