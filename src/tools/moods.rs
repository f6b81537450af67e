//! Mood tools: one mood per user per day

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{parse_date, MoodEntry, MoodKind};
use crate::storage::HabitStorage;
use crate::tools::logs::parse_range;
use crate::tools::{parse_user_id, DateRangeParams, ToolContext, ToolError, UserParams};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpsertMoodParams {
    pub user_id: String,
    /// YYYY-MM-DD
    pub date: String,
    /// One of 😊 😐 😔 😡 😴, or its name (happy, neutral, sad, angry, tired)
    pub mood: String,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoodResponse {
    pub success: bool,
    pub mood: MoodEntry,
}

/// Today's mood, if one was recorded
#[derive(Debug, Serialize)]
pub struct MoodTodayResponse {
    pub mood: Option<MoodEntry>,
}

#[derive(Debug, Serialize)]
pub struct MoodListResponse {
    pub moods: Vec<MoodEntry>,
    pub total_count: usize,
}

/// Record the mood for a day, replacing any earlier one
pub fn upsert_mood<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: UpsertMoodParams,
) -> Result<MoodResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let date = parse_date(&params.date)?;
    let mood: MoodKind = params.mood.parse()?;
    ctx.storage.get_user(&user_id)?;

    let entry = match ctx.storage.find_mood(&user_id, date)? {
        Some(mut existing) => {
            existing.change(mood, params.notes)?;
            ctx.storage.update_mood(&existing)?;
            existing
        }
        None => {
            let entry = MoodEntry::new(user_id, date, mood, params.notes)?;
            ctx.storage.create_mood(&entry)?;
            entry
        }
    };

    Ok(MoodResponse {
        success: true,
        mood: entry,
    })
}

pub fn mood_today<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: UserParams,
) -> Result<MoodTodayResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    ctx.storage.get_user(&user_id)?;

    Ok(MoodTodayResponse {
        mood: ctx.storage.find_mood(&user_id, ctx.clock.today())?,
    })
}

/// Moods within `start_date..=end_date`, newest first
pub fn moods_in_range<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: DateRangeParams,
) -> Result<MoodListResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let (start, end) = parse_range(&params.start_date, &params.end_date)?;
    ctx.storage.get_user(&user_id)?;

    let moods = ctx.storage.list_moods_in_range(&user_id, start, end)?;
    Ok(MoodListResponse {
        total_count: moods.len(),
        moods,
    })
}
