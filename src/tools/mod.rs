//! Tool layer: one function per operation the server exposes
//!
//! Each tool takes a typed parameter struct and returns a serializable
//! response. `dispatch` routes a tool name plus raw JSON arguments to the
//! matching function, and `catalog` describes every tool with a JSON schema
//! derived from its parameter type.

pub mod analytics;
pub mod habits;
pub mod logs;
pub mod moods;
pub mod motivation;
pub mod streaks;
pub mod users;

// Re-export tool functions for easy access
pub use analytics::*;
pub use habits::*;
pub use logs::*;
pub use moods::*;
pub use motivation::*;
pub use streaks::*;
pub use users::*;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::analytics::AnalyticsEngine;
use crate::domain::{Clock, DomainError, HabitId, LogId, StreakEngine, StreakError, UserId};
use crate::storage::{HabitStorage, StorageError};

/// Errors returned by tool calls
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Streak(#[from] StreakError),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Everything a tool call may touch
pub struct ToolContext<'a, S: HabitStorage> {
    pub storage: &'a S,
    pub streaks: &'a StreakEngine,
    pub analytics: &'a AnalyticsEngine,
    pub clock: &'a dyn Clock,
}

/// Generic success response for operations without a payload
#[derive(Debug, Serialize)]
pub struct Acknowledgement {
    pub success: bool,
    pub message: String,
}

impl Acknowledgement {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Name, description and input schema of one tool
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

fn describe<P: JsonSchema>(name: &'static str, description: &'static str) -> ToolInfo {
    let schema = schemars::schema_for!(P);
    ToolInfo {
        name,
        description,
        input_schema: serde_json::to_value(schema).unwrap_or_else(|_| json!({"type": "object"})),
    }
}

/// Every tool the server offers
pub fn catalog() -> Vec<ToolInfo> {
    vec![
        describe::<RegisterUserParams>("user_register", "Register a new user profile"),
        describe::<UserParams>("user_profile", "Get a user's profile, including cached streaks"),
        describe::<UpdateUserParams>("user_update", "Update a user's profile"),
        describe::<CreateHabitParams>("habit_create", "Create a new habit to track"),
        describe::<UserParams>("habit_list", "List active habits, newest first"),
        describe::<HabitParams>("habit_get", "Get a single habit"),
        describe::<UpdateHabitParams>("habit_update", "Change a habit's name, icon, category, type, target or color"),
        describe::<HabitParams>("habit_delete", "Delete a habit and all of its logs"),
        describe::<HabitParams>("habit_archive", "Archive or unarchive a habit"),
        describe::<UpsertLogParams>("log_upsert", "Record progress for a habit on a day and refresh the streak"),
        describe::<UserParams>("log_today", "Get today's logs"),
        describe::<LogsByDateParams>("log_by_date", "Get logs for a specific date"),
        describe::<HabitParams>("log_by_habit", "Get the last 30 logs of a habit"),
        describe::<DateRangeParams>("log_range", "Get logs between two dates (inclusive)"),
        describe::<DeleteLogParams>("log_delete", "Delete a log and refresh the streak"),
        describe::<UpsertMoodParams>("mood_upsert", "Record the mood for a day"),
        describe::<UserParams>("mood_today", "Get today's mood"),
        describe::<DateRangeParams>("mood_range", "Get moods between two dates (inclusive)"),
        describe::<UserParams>("streak_refresh", "Recompute the all-habits streak and store it on the profile"),
        describe::<UserParams>("analytics_overview", "Dashboard overview: habits, today's completion, streaks"),
        describe::<WindowParams>("analytics_trends", "Daily completion for the last N days (default 7)"),
        describe::<UserParams>("analytics_categories", "Active habit count per category"),
        describe::<WindowParams>("analytics_moods", "Mood counts for the last N days (default 30)"),
        describe::<WindowParams>("analytics_best_habits", "Top 5 habits by completion rate over the last N days (default 30)"),
        describe::<NoParams>("motivation_quote", "Quote of the day"),
        describe::<NoParams>("motivation_tips", "Habit building tips"),
    ]
}

/// Deserialize arguments, run the tool, serialize its response
fn call<P, R>(arguments: Value, tool: impl FnOnce(P) -> Result<R, ToolError>) -> Result<Value, ToolError>
where
    P: DeserializeOwned,
    R: Serialize,
{
    let arguments = match arguments {
        Value::Null => json!({}),
        other => other,
    };
    let params: P =
        serde_json::from_value(arguments).map_err(|e| ToolError::InvalidParams(e.to_string()))?;
    let response = tool(params)?;
    Ok(serde_json::to_value(response)?)
}

/// Route a tool call by name
pub fn dispatch<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    name: &str,
    arguments: Value,
) -> Result<Value, ToolError> {
    tracing::debug!("Dispatching tool: {}", name);

    match name {
        "user_register" => call(arguments, |p| register_user(ctx, p)),
        "user_profile" => call(arguments, |p| get_profile(ctx, p)),
        "user_update" => call(arguments, |p| update_user(ctx, p)),
        "habit_create" => call(arguments, |p| create_habit(ctx, p)),
        "habit_list" => call(arguments, |p| list_habits(ctx, p)),
        "habit_get" => call(arguments, |p| get_habit(ctx, p)),
        "habit_update" => call(arguments, |p| update_habit(ctx, p)),
        "habit_delete" => call(arguments, |p| delete_habit(ctx, p)),
        "habit_archive" => call(arguments, |p| toggle_archive(ctx, p)),
        "log_upsert" => call(arguments, |p| upsert_log(ctx, p)),
        "log_today" => call(arguments, |p| logs_today(ctx, p)),
        "log_by_date" => call(arguments, |p| logs_by_date(ctx, p)),
        "log_by_habit" => call(arguments, |p| logs_by_habit(ctx, p)),
        "log_range" => call(arguments, |p| logs_in_range(ctx, p)),
        "log_delete" => call(arguments, |p| delete_log(ctx, p)),
        "mood_upsert" => call(arguments, |p| upsert_mood(ctx, p)),
        "mood_today" => call(arguments, |p| mood_today(ctx, p)),
        "mood_range" => call(arguments, |p| moods_in_range(ctx, p)),
        "streak_refresh" => call(arguments, |p| refresh_streak(ctx, p)),
        "analytics_overview" => call(arguments, |p| overview(ctx, p)),
        "analytics_trends" => call(arguments, |p| trends(ctx, p)),
        "analytics_categories" => call(arguments, |p| category_breakdown(ctx, p)),
        "analytics_moods" => call(arguments, |p| mood_stats(ctx, p)),
        "analytics_best_habits" => call(arguments, |p| best_habits(ctx, p)),
        "motivation_quote" => call(arguments, |_: NoParams| Ok(quote_of_the_day(ctx.clock))),
        "motivation_tips" => call(arguments, |_: NoParams| Ok(tips())),
        _ => Err(ToolError::UnknownTool(name.to_string())),
    }
}

// Shared argument parsing

pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, ToolError> {
    UserId::from_string(raw)
        .map_err(|_| ToolError::InvalidParams(format!("'{}' is not a valid user ID", raw)))
}

pub(crate) fn parse_habit_id(raw: &str) -> Result<HabitId, ToolError> {
    HabitId::from_string(raw)
        .map_err(|_| ToolError::InvalidParams(format!("'{}' is not a valid habit ID", raw)))
}

pub(crate) fn parse_log_id(raw: &str) -> Result<LogId, ToolError> {
    LogId::from_string(raw)
        .map_err(|_| ToolError::InvalidParams(format!("'{}' is not a valid log ID", raw)))
}
