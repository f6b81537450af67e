//! HabitLog entity for tracking daily progress
//!
//! A log records how much progress a user made on one habit on one calendar
//! day. There is at most one log per (user, habit, date); repeated writes for
//! the same day update the existing log.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{clean_notes, validate_notes, DomainError, Habit, HabitId, LogId, UserId};

/// Progress recorded for one habit on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitLog {
    pub id: LogId,
    pub user_id: UserId,
    pub habit_id: HabitId,
    /// Which day this progress was for
    pub date: NaiveDate,
    /// Any finite non-negative amount; fractions allowed (5.5 km toward 5)
    pub progress: f64,
    /// `progress >= habit.target` at the time of the last write
    pub completed: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HabitLog {
    /// Create a log for `habit` on `date`
    pub fn new(
        habit: &Habit,
        date: NaiveDate,
        progress: f64,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        validate_progress(progress)?;
        validate_notes(&notes)?;

        let now = Utc::now();
        Ok(Self {
            id: LogId::new(),
            user_id: habit.user_id.clone(),
            habit_id: habit.id.clone(),
            date,
            progress,
            completed: habit.is_completed_by(progress),
            notes: clean_notes(notes),
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite the progress of an existing log
    ///
    /// Notes are only replaced when new ones are given.
    pub fn record_progress(
        &mut self,
        habit: &Habit,
        progress: f64,
        notes: Option<String>,
    ) -> Result<(), DomainError> {
        validate_progress(progress)?;
        validate_notes(&notes)?;

        self.progress = progress;
        self.completed = habit.is_completed_by(progress);
        if let Some(notes) = clean_notes(notes) {
            self.notes = Some(notes);
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn validate_progress(progress: f64) -> Result<(), DomainError> {
    if !progress.is_finite() || progress < 0.0 {
        return Err(DomainError::InvalidProgress(format!(
            "{} must be a non-negative number",
            progress
        )));
    }
    Ok(())
}
