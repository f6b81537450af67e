//! Daily mood entries

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{clean_notes, validate_notes, DomainError, MoodId, MoodKind, UserId};

/// How a user felt on one day; at most one per (user, date)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: MoodId,
    pub user_id: UserId,
    pub date: NaiveDate,
    pub mood: MoodKind,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        mood: MoodKind,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        validate_notes(&notes)?;

        let now = Utc::now();
        Ok(Self {
            id: MoodId::new(),
            user_id,
            date,
            mood,
            notes: clean_notes(notes),
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the mood; notes only change when new ones are given
    pub fn change(&mut self, mood: MoodKind, notes: Option<String>) -> Result<(), DomainError> {
        validate_notes(&notes)?;

        self.mood = mood;
        if let Some(notes) = clean_notes(notes) {
            self.notes = Some(notes);
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
