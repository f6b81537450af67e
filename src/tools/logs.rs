//! Daily log tools
//!
//! `log_upsert` and `log_delete` change what the streak engine sees, so both
//! finish by refreshing the cached streak on the user's profile. The read
//! tools return logs with a short summary of the habit each belongs to.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::HabitBrief;
use crate::domain::{parse_date, HabitId, HabitLog, UserId};
use crate::storage::HabitStorage;
use crate::tools::streaks::refresh_cached_streak;
use crate::tools::{
    parse_habit_id, parse_log_id, parse_user_id, HabitParams, StreakSummary, ToolContext,
    ToolError, UserParams,
};

/// Number of logs `log_by_habit` returns
pub const HABIT_HISTORY_LIMIT: u32 = 30;

/// Parameters for recording progress
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpsertLogParams {
    pub user_id: String,
    pub habit_id: String,
    /// Day the progress belongs to (YYYY-MM-DD); may not be in the future
    pub date: String,
    /// Progress made that day, a non-negative number; fractions are allowed.
    /// The habit is complete once it reaches the target
    pub progress: f64,
    /// Optional notes, up to 500 characters
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogsByDateParams {
    pub user_id: String,
    /// YYYY-MM-DD
    pub date: String,
}

/// Inclusive date range
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DateRangeParams {
    pub user_id: String,
    /// First day (YYYY-MM-DD)
    pub start_date: String,
    /// Last day (YYYY-MM-DD)
    pub end_date: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteLogParams {
    pub user_id: String,
    pub log_id: String,
}

/// A log together with the habit it belongs to
#[derive(Debug, Serialize)]
pub struct LogEntry {
    #[serde(flatten)]
    pub log: HabitLog,
    pub habit: HabitBrief,
}

#[derive(Debug, Serialize)]
pub struct LogListResponse {
    pub logs: Vec<LogEntry>,
    pub total_count: usize,
}

/// Response from a write that triggers a streak refresh
#[derive(Debug, Serialize)]
pub struct LogMutationResponse {
    pub success: bool,
    /// The stored log, or the one just removed by a delete
    pub log: Option<HabitLog>,
    #[serde(flatten)]
    pub streak: StreakSummary,
    pub message: String,
}

/// Create or overwrite the log for (habit, date), then refresh the streak
pub fn upsert_log<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: UpsertLogParams,
) -> Result<LogMutationResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let habit_id = parse_habit_id(&params.habit_id)?;
    let date = parse_date(&params.date)?;
    if date > ctx.clock.today() {
        return Err(ToolError::InvalidParams(format!(
            "Cannot log progress for a future date: {}",
            date
        )));
    }

    let mut user = ctx.storage.get_user(&user_id)?;
    let habit = ctx.storage.get_habit(&user_id, &habit_id)?;

    // The log and the profile it refreshes are stored together or not at all
    let (log, streak) = ctx.storage.atomically(|| -> Result<_, ToolError> {
        let log = match ctx.storage.find_log(&user_id, &habit_id, date)? {
            Some(mut existing) => {
                existing.record_progress(&habit, params.progress, params.notes)?;
                ctx.storage.update_log(&existing)?;
                existing
            }
            None => {
                let log = HabitLog::new(&habit, date, params.progress, params.notes)?;
                ctx.storage.create_log(&log)?;
                log
            }
        };
        tracing::debug!(
            "Stored log {} for habit {} on {} (completed: {})",
            log.id,
            habit.id,
            date,
            log.completed
        );

        if log.completed {
            user.last_completion_at = Some(Utc::now());
        }
        let streak = refresh_cached_streak(ctx, &mut user);
        ctx.storage.update_user(&user)?;
        Ok((log, streak))
    })?;

    let message = if log.completed {
        format!("🎉 {} {} complete for {}!", habit.icon, habit.name, date)
    } else {
        format!(
            "📝 {} progress {}/{} for {}",
            habit.name, log.progress, habit.target, date
        )
    };

    Ok(LogMutationResponse {
        success: true,
        log: Some(log),
        streak,
        message,
    })
}

/// Delete a log, then refresh the streak
pub fn delete_log<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: DeleteLogParams,
) -> Result<LogMutationResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let log_id = parse_log_id(&params.log_id)?;

    let mut user = ctx.storage.get_user(&user_id)?;
    let log = ctx.storage.get_log(&user_id, &log_id)?;

    let streak = ctx.storage.atomically(|| -> Result<_, ToolError> {
        ctx.storage.delete_log(&user_id, &log_id)?;
        let streak = refresh_cached_streak(ctx, &mut user);
        ctx.storage.update_user(&user)?;
        Ok(streak)
    })?;

    Ok(LogMutationResponse {
        success: true,
        message: format!("Deleted log for {}", log.date),
        log: Some(log),
        streak,
    })
}

pub fn logs_today<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: UserParams,
) -> Result<LogListResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    logs_for_day(ctx, &user_id, ctx.clock.today())
}

pub fn logs_by_date<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: LogsByDateParams,
) -> Result<LogListResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let date = parse_date(&params.date)?;
    logs_for_day(ctx, &user_id, date)
}

/// The most recent logs of one habit, newest first
pub fn logs_by_habit<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: HabitParams,
) -> Result<LogListResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let habit_id = parse_habit_id(&params.habit_id)?;

    let habit = ctx.storage.get_habit(&user_id, &habit_id)?;
    let logs = ctx
        .storage
        .list_logs_for_habit(&user_id, &habit_id, HABIT_HISTORY_LIMIT)?;

    let brief = HabitBrief::from(&habit);
    let logs: Vec<LogEntry> = logs
        .into_iter()
        .map(|log| LogEntry {
            log,
            habit: brief.clone(),
        })
        .collect();

    Ok(LogListResponse {
        total_count: logs.len(),
        logs,
    })
}

/// Logs dated within `start_date..=end_date`, newest first
pub fn logs_in_range<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: DateRangeParams,
) -> Result<LogListResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let (start, end) = parse_range(&params.start_date, &params.end_date)?;

    ctx.storage.get_user(&user_id)?;
    let logs = ctx.storage.list_logs_in_range(&user_id, start, end)?;
    with_habits(ctx, &user_id, logs)
}

fn logs_for_day<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    user_id: &UserId,
    date: NaiveDate,
) -> Result<LogListResponse, ToolError> {
    ctx.storage.get_user(user_id)?;
    let logs = ctx.storage.list_logs(user_id, date)?;
    with_habits(ctx, user_id, logs)
}

/// Attach a habit summary to every log, fetching each habit once
fn with_habits<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    user_id: &UserId,
    logs: Vec<HabitLog>,
) -> Result<LogListResponse, ToolError> {
    let mut habits: HashMap<HabitId, HabitBrief> = HashMap::new();
    let mut entries = Vec::with_capacity(logs.len());

    for log in logs {
        let habit = match habits.get(&log.habit_id) {
            Some(brief) => brief.clone(),
            None => {
                let brief = HabitBrief::from(&ctx.storage.get_habit(user_id, &log.habit_id)?);
                habits.insert(log.habit_id.clone(), brief.clone());
                brief
            }
        };
        entries.push(LogEntry { log, habit });
    }

    Ok(LogListResponse {
        total_count: entries.len(),
        logs: entries,
    })
}

/// Parse an inclusive range; the start may not come after the end
pub(crate) fn parse_range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), ToolError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start > end {
        return Err(ToolError::InvalidParams(format!(
            "start_date {} is after end_date {}",
            start, end
        )));
    }
    Ok((start, end))
}
