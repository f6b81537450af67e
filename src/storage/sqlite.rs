//! SQLite implementation of the storage interfaces
//!
//! This module provides the concrete SQLite implementation for storing and
//! retrieving users, habits, logs and moods. It handles all SQL queries and
//! row conversion.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::domain::{
    Category, Habit, HabitColor, HabitId, HabitKind, HabitLog, LogId, MoodEntry, MoodId,
    MoodKind, User, UserId,
};
use crate::storage::{
    migrations, HabitReader, HabitRepository, LogReader, LogRepository, MoodRepository,
    StorageError, Transactional, UserStore,
};

const USER_COLUMNS: &str =
    "id, name, email, current_streak, longest_streak, last_completion_at, created_at";

const HABIT_COLUMNS: &str =
    "id, user_id, name, icon, category, kind, target, color, is_archived, created_at, updated_at";

const LOG_COLUMNS: &str =
    "id, user_id, habit_id, date, progress, completed, notes, created_at, updated_at";

const MOOD_COLUMNS: &str = "id, user_id, date, mood, notes, created_at, updated_at";

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// every repository trait in `crate::storage`.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database at `db_path` and bring its schema up to date
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {}", db_path.display());
        Ok(storage)
    }

    /// Throwaway database for tests and dry runs
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        // Cascading habit deletes rely on this
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    fn query_logs(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<HabitLog>, StorageError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_log)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

// Row conversion helpers

/// Parse a text column, reporting failures as a column conversion error
fn parse_column<T, E>(
    idx: usize,
    row: &Row<'_>,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> rusqlite::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    parse(&raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: parse_column(0, row, UserId::from_string)?,
        name: row.get(1)?,
        email: row.get(2)?,
        current_streak: row.get(3)?,
        longest_streak: row.get(4)?,
        last_completion_at: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn row_to_habit(row: &Row<'_>) -> rusqlite::Result<Habit> {
    Ok(Habit {
        id: parse_column(0, row, HabitId::from_string)?,
        user_id: parse_column(1, row, UserId::from_string)?,
        name: row.get(2)?,
        icon: row.get(3)?,
        category: parse_column(4, row, |s| s.parse::<Category>())?,
        kind: parse_column(5, row, |s| s.parse::<HabitKind>())?,
        target: row.get(6)?,
        color: parse_column(7, row, |s| s.parse::<HabitColor>())?,
        is_archived: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn row_to_log(row: &Row<'_>) -> rusqlite::Result<HabitLog> {
    Ok(HabitLog {
        id: parse_column(0, row, LogId::from_string)?,
        user_id: parse_column(1, row, UserId::from_string)?,
        habit_id: parse_column(2, row, HabitId::from_string)?,
        date: row.get(3)?,
        progress: row.get(4)?,
        completed: row.get(5)?,
        notes: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn row_to_mood(row: &Row<'_>) -> rusqlite::Result<MoodEntry> {
    Ok(MoodEntry {
        id: parse_column(0, row, MoodId::from_string)?,
        user_id: parse_column(1, row, UserId::from_string)?,
        date: row.get(2)?,
        mood: parse_column(3, row, |s| s.parse::<MoodKind>())?,
        notes: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// Only the unique index on `users.email` counts; primary key and CHECK
/// failures stay query errors
fn is_duplicate_email(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, Some(message)) => {
            e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                && message.contains("users.email")
        }
        _ => false,
    }
}

impl Transactional for SqliteStorage {
    fn atomically<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<StorageError>,
    {
        // Repository methods share `self.conn`, so they run inside this
        // transaction; dropping it without commit rolls back
        let tx = self.conn.unchecked_transaction().map_err(StorageError::from)?;
        let value = work()?;
        tx.commit().map_err(StorageError::from)?;
        Ok(value)
    }
}

impl UserStore for SqliteStorage {
    fn create_user(&self, user: &User) -> Result<(), StorageError> {
        let result = self.conn.execute(
            "INSERT INTO users (
                id, name, email, current_streak, longest_streak, last_completion_at, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user.id.to_string(),
                user.name,
                user.email,
                user.current_streak,
                user.longest_streak,
                user.last_completion_at,
                user.created_at,
            ],
        );

        match result {
            Ok(_) => {
                tracing::debug!("Created user: {} ({})", user.email, user.id);
                Ok(())
            }
            Err(e) if is_duplicate_email(&e) => Err(StorageError::DuplicateEmail {
                email: user.email.clone(),
            }),
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn get_user(&self, user_id: &UserId) -> Result<User, StorageError> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
                params![user_id.to_string()],
                row_to_user,
            )
            .optional()?
            .ok_or_else(|| StorageError::UserNotFound {
                user_id: user_id.to_string(),
            })
    }

    fn update_user(&self, user: &User) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "UPDATE users SET
                name = ?2,
                current_streak = ?3,
                longest_streak = ?4,
                last_completion_at = ?5
             WHERE id = ?1",
            params![
                user.id.to_string(),
                user.name,
                user.current_streak,
                user.longest_streak,
                user.last_completion_at,
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::UserNotFound {
                user_id: user.id.to_string(),
            });
        }

        tracing::debug!(
            "Updated user {}: streak {} (longest {})",
            user.id,
            user.current_streak,
            user.longest_streak
        );
        Ok(())
    }
}

impl HabitReader for SqliteStorage {
    fn list_active_habits(&self, user_id: &UserId) -> Result<Vec<Habit>, StorageError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM habits
             WHERE user_id = ?1 AND is_archived = 0
             ORDER BY created_at DESC",
            HABIT_COLUMNS
        ))?;

        let habits = stmt
            .query_map(params![user_id.to_string()], row_to_habit)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(habits)
    }
}

impl HabitRepository for SqliteStorage {
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO habits (
                id, user_id, name, icon, category, kind, target, color,
                is_archived, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                habit.id.to_string(),
                habit.user_id.to_string(),
                habit.name,
                habit.icon,
                habit.category.as_str(),
                habit.kind.as_str(),
                habit.target,
                habit.color.as_str(),
                habit.is_archived,
                habit.created_at,
                habit.updated_at,
            ],
        )?;

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn get_habit(&self, user_id: &UserId, habit_id: &HabitId) -> Result<Habit, StorageError> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM habits WHERE id = ?1 AND user_id = ?2",
                    HABIT_COLUMNS
                ),
                params![habit_id.to_string(), user_id.to_string()],
                row_to_habit,
            )
            .optional()?
            .ok_or_else(|| StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            })
    }

    fn update_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "UPDATE habits SET
                name = ?3,
                icon = ?4,
                category = ?5,
                kind = ?6,
                target = ?7,
                color = ?8,
                is_archived = ?9,
                updated_at = ?10
             WHERE id = ?1 AND user_id = ?2",
            params![
                habit.id.to_string(),
                habit.user_id.to_string(),
                habit.name,
                habit.icon,
                habit.category.as_str(),
                habit.kind.as_str(),
                habit.target,
                habit.color.as_str(),
                habit.is_archived,
                habit.updated_at,
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit.id.to_string(),
            });
        }

        tracing::debug!("Updated habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn delete_habit(&self, user_id: &UserId, habit_id: &HabitId) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "DELETE FROM habits WHERE id = ?1 AND user_id = ?2",
            params![habit_id.to_string(), user_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }

        tracing::debug!("Deleted habit: {}", habit_id);
        Ok(())
    }
}

impl LogReader for SqliteStorage {
    fn list_logs(&self, user_id: &UserId, date: NaiveDate) -> Result<Vec<HabitLog>, StorageError> {
        self.query_logs(
            &format!(
                "SELECT {} FROM habit_logs
                 WHERE user_id = ?1 AND date = ?2
                 ORDER BY created_at",
                LOG_COLUMNS
            ),
            params![user_id.to_string(), date],
        )
    }
}

impl LogRepository for SqliteStorage {
    fn create_log(&self, log: &HabitLog) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO habit_logs (
                id, user_id, habit_id, date, progress, completed, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                log.id.to_string(),
                log.user_id.to_string(),
                log.habit_id.to_string(),
                log.date,
                log.progress,
                log.completed,
                log.notes,
                log.created_at,
                log.updated_at,
            ],
        )?;

        tracing::debug!("Created log {} for habit {} on {}", log.id, log.habit_id, log.date);
        Ok(())
    }

    fn update_log(&self, log: &HabitLog) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "UPDATE habit_logs SET
                progress = ?3,
                completed = ?4,
                notes = ?5,
                updated_at = ?6
             WHERE id = ?1 AND user_id = ?2",
            params![
                log.id.to_string(),
                log.user_id.to_string(),
                log.progress,
                log.completed,
                log.notes,
                log.updated_at,
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::LogNotFound {
                log_id: log.id.to_string(),
            });
        }

        tracing::debug!("Updated log {} for habit {} on {}", log.id, log.habit_id, log.date);
        Ok(())
    }

    fn find_log(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        date: NaiveDate,
    ) -> Result<Option<HabitLog>, StorageError> {
        let log = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM habit_logs
                     WHERE user_id = ?1 AND habit_id = ?2 AND date = ?3",
                    LOG_COLUMNS
                ),
                params![user_id.to_string(), habit_id.to_string(), date],
                row_to_log,
            )
            .optional()?;

        Ok(log)
    }

    fn get_log(&self, user_id: &UserId, log_id: &LogId) -> Result<HabitLog, StorageError> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM habit_logs WHERE id = ?1 AND user_id = ?2",
                    LOG_COLUMNS
                ),
                params![log_id.to_string(), user_id.to_string()],
                row_to_log,
            )
            .optional()?
            .ok_or_else(|| StorageError::LogNotFound {
                log_id: log_id.to_string(),
            })
    }

    fn delete_log(&self, user_id: &UserId, log_id: &LogId) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "DELETE FROM habit_logs WHERE id = ?1 AND user_id = ?2",
            params![log_id.to_string(), user_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::LogNotFound {
                log_id: log_id.to_string(),
            });
        }

        tracing::debug!("Deleted log: {}", log_id);
        Ok(())
    }

    fn list_logs_for_habit(
        &self,
        user_id: &UserId,
        habit_id: &HabitId,
        limit: u32,
    ) -> Result<Vec<HabitLog>, StorageError> {
        self.query_logs(
            &format!(
                "SELECT {} FROM habit_logs
                 WHERE user_id = ?1 AND habit_id = ?2
                 ORDER BY date DESC
                 LIMIT ?3",
                LOG_COLUMNS
            ),
            params![user_id.to_string(), habit_id.to_string(), limit],
        )
    }

    fn list_logs_in_range(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HabitLog>, StorageError> {
        self.query_logs(
            &format!(
                "SELECT {} FROM habit_logs
                 WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3
                 ORDER BY date DESC, created_at DESC",
                LOG_COLUMNS
            ),
            params![user_id.to_string(), start, end],
        )
    }

    fn count_completed_logs(&self, user_id: &UserId) -> Result<u32, StorageError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM habit_logs WHERE user_id = ?1 AND completed = 1",
            params![user_id.to_string()],
            |row| row.get::<_, u32>(0),
        )?;

        Ok(count)
    }
}

impl MoodRepository for SqliteStorage {
    fn create_mood(&self, mood: &MoodEntry) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO moods (id, user_id, date, mood, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                mood.id.to_string(),
                mood.user_id.to_string(),
                mood.date,
                mood.mood.as_emoji(),
                mood.notes,
                mood.created_at,
                mood.updated_at,
            ],
        )?;

        tracing::debug!("Recorded mood {} for {}", mood.mood.name(), mood.date);
        Ok(())
    }

    fn update_mood(&self, mood: &MoodEntry) -> Result<(), StorageError> {
        self.conn.execute(
            "UPDATE moods SET mood = ?3, notes = ?4, updated_at = ?5
             WHERE id = ?1 AND user_id = ?2",
            params![
                mood.id.to_string(),
                mood.user_id.to_string(),
                mood.mood.as_emoji(),
                mood.notes,
                mood.updated_at,
            ],
        )?;

        tracing::debug!("Updated mood {} for {}", mood.mood.name(), mood.date);
        Ok(())
    }

    fn find_mood(&self, user_id: &UserId, date: NaiveDate) -> Result<Option<MoodEntry>, StorageError> {
        let mood = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM moods WHERE user_id = ?1 AND date = ?2",
                    MOOD_COLUMNS
                ),
                params![user_id.to_string(), date],
                row_to_mood,
            )
            .optional()?;

        Ok(mood)
    }

    fn list_moods_in_range(
        &self,
        user_id: &UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MoodEntry>, StorageError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM moods
             WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3
             ORDER BY date DESC",
            MOOD_COLUMNS
        ))?;

        let moods = stmt
            .query_map(params![user_id.to_string(), start, end], row_to_mood)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(moods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewHabit;

    fn storage_with_user() -> (SqliteStorage, User) {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let user = User::new("Ada".to_string(), "ada@example.com".to_string()).unwrap();
        storage.create_user(&user).unwrap();
        (storage, user)
    }

    fn create_habit(storage: &SqliteStorage, user: &User, name: &str) -> Habit {
        let habit = Habit::new(
            user.id.clone(),
            NewHabit {
                name: name.to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        storage.create_habit(&habit).unwrap();
        habit
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_user_round_trip() {
        let (storage, mut user) = storage_with_user();
        user.record_streak(3);
        storage.update_user(&user).unwrap();

        let loaded = storage.get_user(&user.id).unwrap();
        assert_eq!(loaded.email, "ada@example.com");
        assert_eq!(loaded.current_streak, 3);
        assert_eq!(loaded.longest_streak, 3);
    }

    #[test]
    fn test_duplicate_email() {
        let (storage, _) = storage_with_user();
        let twin = User::new("Ada Two".to_string(), "ADA@example.com".to_string()).unwrap();

        assert!(matches!(
            storage.create_user(&twin),
            Err(StorageError::DuplicateEmail { .. })
        ));
    }

    #[test]
    fn test_reused_id_is_not_a_duplicate_email() {
        let (storage, user) = storage_with_user();
        let mut clash = user.clone();
        clash.email = "someone.else@example.com".to_string();

        assert!(matches!(
            storage.create_user(&clash),
            Err(StorageError::Query(_))
        ));
    }

    #[test]
    fn test_atomically_rolls_back_on_error() {
        let (storage, user) = storage_with_user();
        let habit = create_habit(&storage, &user, "Stretch");
        let log = HabitLog::new(&habit, day(4), 1.0, None).unwrap();

        let result: Result<(), StorageError> = storage.atomically(|| {
            storage.create_log(&log)?;
            Err(StorageError::Connection("disk full".to_string()))
        });
        assert!(result.is_err());
        assert!(storage.find_log(&user.id, &habit.id, day(4)).unwrap().is_none());

        storage
            .atomically(|| storage.create_log(&log))
            .unwrap();
        assert!(storage.find_log(&user.id, &habit.id, day(4)).unwrap().is_some());
    }

    #[test]
    fn test_habit_round_trip() {
        let (storage, user) = storage_with_user();
        let habit = create_habit(&storage, &user, "Meditate");

        let loaded = storage.get_habit(&user.id, &habit.id).unwrap();
        assert_eq!(loaded.name, habit.name);
        assert_eq!(loaded.category, habit.category);
        assert_eq!(loaded.kind, habit.kind);
        assert_eq!(loaded.color, habit.color);
        assert_eq!(loaded.target, habit.target);
    }

    #[test]
    fn test_habits_are_scoped_to_owner() {
        let (storage, user) = storage_with_user();
        let other = User::new("Bob".to_string(), "bob@example.com".to_string()).unwrap();
        storage.create_user(&other).unwrap();
        let habit = create_habit(&storage, &user, "Meditate");

        assert!(matches!(
            storage.get_habit(&other.id, &habit.id),
            Err(StorageError::HabitNotFound { .. })
        ));
        assert!(storage.list_active_habits(&other.id).unwrap().is_empty());
    }

    #[test]
    fn test_archived_habits_are_not_active() {
        let (storage, user) = storage_with_user();
        let mut habit = create_habit(&storage, &user, "Meditate");
        create_habit(&storage, &user, "Walk");

        habit.toggle_archive();
        storage.update_habit(&habit).unwrap();

        let active = storage.list_active_habits(&user.id).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Walk");
    }

    #[test]
    fn test_log_uniqueness_per_habit_and_day() {
        let (storage, user) = storage_with_user();
        let habit = create_habit(&storage, &user, "Meditate");

        storage.create_log(&HabitLog::new(&habit, day(1), 1.0, None).unwrap()).unwrap();
        let duplicate = HabitLog::new(&habit, day(1), 1.0, None).unwrap();
        assert!(storage.create_log(&duplicate).is_err());
    }

    #[test]
    fn test_find_and_update_log() {
        let (storage, user) = storage_with_user();
        let habit = create_habit(&storage, &user, "Meditate");
        storage.create_log(&HabitLog::new(&habit, day(2), 0.0, None).unwrap()).unwrap();

        let mut log = storage.find_log(&user.id, &habit.id, day(2)).unwrap().unwrap();
        assert!(!log.completed);
        log.record_progress(&habit, 1.0, Some("done".to_string())).unwrap();
        storage.update_log(&log).unwrap();

        let reloaded = storage.get_log(&user.id, &log.id).unwrap();
        assert!(reloaded.completed);
        assert_eq!(reloaded.notes.as_deref(), Some("done"));
        assert!(storage.find_log(&user.id, &habit.id, day(3)).unwrap().is_none());
    }

    #[test]
    fn test_logs_by_date_and_range() {
        let (storage, user) = storage_with_user();
        let habit = create_habit(&storage, &user, "Meditate");
        for d in 1..=5 {
            storage.create_log(&HabitLog::new(&habit, day(d), 1.0, None).unwrap()).unwrap();
        }

        assert_eq!(storage.list_logs(&user.id, day(3)).unwrap().len(), 1);

        let range = storage.list_logs_in_range(&user.id, day(2), day(4)).unwrap();
        let dates: Vec<_> = range.iter().map(|l| l.date).collect();
        assert_eq!(dates, vec![day(4), day(3), day(2)]);

        let recent = storage.list_logs_for_habit(&user.id, &habit.id, 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, day(5));

        assert_eq!(storage.count_completed_logs(&user.id).unwrap(), 5);
    }

    #[test]
    fn test_deleting_habit_cascades_logs() {
        let (storage, user) = storage_with_user();
        let habit = create_habit(&storage, &user, "Meditate");
        storage.create_log(&HabitLog::new(&habit, day(1), 1.0, None).unwrap()).unwrap();

        storage.delete_habit(&user.id, &habit.id).unwrap();

        assert!(storage.list_logs(&user.id, day(1)).unwrap().is_empty());
        assert!(matches!(
            storage.delete_habit(&user.id, &habit.id),
            Err(StorageError::HabitNotFound { .. })
        ));
    }

    #[test]
    fn test_mood_round_trip() {
        let (storage, user) = storage_with_user();
        let mut mood = MoodEntry::new(user.id.clone(), day(7), MoodKind::Happy, None).unwrap();
        storage.create_mood(&mood).unwrap();

        mood.change(MoodKind::Tired, Some("long day".to_string())).unwrap();
        storage.update_mood(&mood).unwrap();

        let loaded = storage.find_mood(&user.id, day(7)).unwrap().unwrap();
        assert_eq!(loaded.mood, MoodKind::Tired);
        assert_eq!(loaded.notes.as_deref(), Some("long day"));
        assert_eq!(storage.list_moods_in_range(&user.id, day(1), day(31)).unwrap().len(), 1);
    }
}
