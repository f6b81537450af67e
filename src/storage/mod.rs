//! Storage layer for persisting habit data
//!
//! This module defines the repository interfaces the rest of the crate is
//! written against, and re-exports the SQLite implementation of them.

pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Habit, HabitId, HabitLog, LogId, MoodEntry, User, UserId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Log not found: {log_id}")]
    LogNotFound { log_id: String },

    #[error("A user already exists with email {email}")]
    DuplicateEmail { email: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Profile store holding users and their cached streak values
pub trait UserStore {
    /// Create a new user; fails with `DuplicateEmail` if the email is taken
    fn create_user(&self, user: &User) -> Result<(), StorageError>;

    fn get_user(&self, user_id: &UserId) -> Result<User, StorageError>;

    /// Persist name, streak fields and last completion time
    fn update_user(&self, user: &User) -> Result<(), StorageError>;
}

/// Read side of the habit repository used by the streak engine
pub trait HabitReader {
    /// Non-archived habits owned by `user_id`
    fn list_active_habits(&self, user_id: &UserId) -> Result<Vec<Habit>, StorageError>;
}

/// Read side of the log repository used by the streak engine
pub trait LogReader {
    /// Every log `user_id` wrote for `date`
    fn list_logs(&self, user_id: &UserId, date: NaiveDate) -> Result<Vec<HabitLog>, StorageError>;
}

/// Habit persistence; every lookup is scoped to the owning user
pub trait HabitRepository: HabitReader {
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    fn get_habit(&self, user_id: &UserId, habit_id: &HabitId) -> Result<Habit, StorageError>;

    fn update_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Hard delete; the habit's logs go with it
    fn delete_habit(&self, user_id: &UserId, habit_id: &HabitId) -> Result<(), StorageError>;
}

/// Log persistence; every lookup is scoped to the owning user
pub trait LogRepository: LogReader {
    fn create_log(&self, log: &HabitLog) -> Result<(), StorageError>;

    fn update_log(&self, log: &HabitLog) -> Result<(), StorageError>;

    /// The log for (user, habit, date), if one was written
    fn find_log(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<Option<HabitLog>, StorageError>;

    fn get_log(&self, user_id: &UserId, log_id: &LogId) -> Result<HabitLog, StorageError>;

    fn delete_log(&self, user_id: &UserId, log_id: &LogId) -> Result<(), StorageError>;

    /// Most recent logs of one habit, newest first
    fn list_logs_for_habit(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        limit: u32,
    ) -> Result<Vec<HabitLog>, StorageError>;

    /// Logs dated within `start..=end`, newest first
    fn list_logs_in_range(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HabitLog>, StorageError>;

    /// All-time number of completed logs
    fn count_completed_logs(&self, user_id: &UserId) -> Result<u32, StorageError>;
}

/// Mood persistence
pub trait MoodRepository {
    fn create_mood(&self, mood: &MoodEntry) -> Result<(), StorageError>;

    fn update_mood(&self, mood: &MoodEntry) -> Result<(), StorageError>;

    fn find_mood(&self, user_id: &UserId, date: NaiveDate) -> Result<Option<MoodEntry>, StorageError>;

    /// Moods dated within `start..=end`, newest first
    fn list_moods_in_range(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MoodEntry>, StorageError>;
}

/// Groups several repository calls into one unit of work
pub trait Transactional {
    /// Run `work`, committing its writes if it returns `Ok` and rolling all
    /// of them back if it returns `Err`
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<StorageError>;
}

/// Everything the tools need from a backing store
///
/// Implemented automatically for any type providing all the repositories, so
/// tool functions can take a single `S: HabitStorage` bound.
pub trait HabitStorage:
    UserStore + HabitRepository + LogRepository + MoodRepository + Transactional
{
}

impl<T> HabitStorage for T where
    T: UserStore + HabitRepository + LogRepository + MoodRepository + Transactional
{
}
