//! All-habits streak calculation
//!
//! A user's streak is the number of consecutive calendar days, ending at the
//! most recent fully-completed day, on which every one of their active habits
//! reached its target. The engine walks backward from today one day at a
//! time and stops at the first day that falls short.
//!
//! The scan always uses the user's *current* active habits, for past days
//! too. Archiving a habit can therefore lengthen a streak, and adding one
//! can shorten it.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{Clock, Habit, HabitLog, UserId};
use crate::storage::{HabitReader, LogReader, StorageError};

/// Default number of days the backward scan may visit
pub const DEFAULT_MAX_LOOKBACK_DAYS: u32 = 3650;

/// Errors surfaced by the streak engine
#[derive(Error, Debug)]
pub enum StreakError {
    /// A habit or log read failed; the streak is unknown, not zero
    #[error("Streak computation failed: {0}")]
    ComputationFailed(#[source] StorageError),
}

impl From<StorageError> for StreakError {
    fn from(err: StorageError) -> Self {
        StreakError::ComputationFailed(err)
    }
}

/// Computes a user's current streak from their habits and daily logs
///
/// "Today" is taken from the injected clock once per computation. The scan
/// visits at most `max_lookback_days` days, so corrupt or adversarial data
/// can't keep it running.
pub struct StreakEngine {
    clock: Arc<dyn Clock>,
    max_lookback_days: u32,
}

impl StreakEngine {
    /// Create an engine; a lookback of 0 is raised to 1 so today is always checked
    pub fn new(clock: Arc<dyn Clock>, max_lookback_days: u32) -> Self {
        Self {
            clock,
            max_lookback_days: max_lookback_days.max(1),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn max_lookback_days(&self) -> u32 {
        self.max_lookback_days
    }

    /// Count consecutive fully-completed days for `user_id`
    ///
    /// Returns `Ok(0)` when the user has no active habits. Today is only
    /// counted once it is complete; an incomplete today does not end the
    /// scan, so a streak read before today's logging still reports the run
    /// that ended yesterday. Any earlier incomplete day ends the scan.
    pub fn compute_streak<R>(&self, repo: &R, user_id: &UserId) -> Result<u32, StreakError>
    where
        R: HabitReader + LogReader + ?Sized,
    {
        let habits = repo.list_active_habits(user_id)?;
        if habits.is_empty() {
            debug!("User {} has no active habits, streak is 0", user_id);
            return Ok(0);
        }

        let today = self.clock.today();
        let mut streak = 0u32;
        let mut day = today;

        for _ in 0..self.max_lookback_days {
            let logs = repo.list_logs(user_id, day)?;

            if is_day_complete(&habits, &logs) {
                streak += 1;
            } else if day != today {
                debug!("Streak for user {} ends before {}: {} days", user_id, day, streak);
                return Ok(streak);
            }

            day = match day.pred_opt() {
                Some(previous) => previous,
                None => return Ok(streak),
            };
        }

        warn!(
            "Streak scan for user {} reached the {}-day lookback limit",
            user_id, self.max_lookback_days
        );
        Ok(streak)
    }
}

/// Whether every habit in `habits` has a log in `logs` that reaches its target
///
/// `logs` are expected to belong to a single day. Logs for habits outside
/// `habits` are ignored.
pub fn is_day_complete(habits: &[Habit], logs: &[HabitLog]) -> bool {
    habits.iter().all(|habit| {
        logs.iter()
            .any(|log| log.habit_id == habit.id && habit.is_completed_by(log.progress))
    })
}
