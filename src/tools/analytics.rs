//! Dashboard analytics tools
//!
//! Thin wrappers around [`AnalyticsEngine`](crate::analytics::AnalyticsEngine)
//! that validate the requested window.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{
    CategoryCount, HabitPerformance, MoodCount, Overview, TrendPoint, DEFAULT_STATS_DAYS,
    DEFAULT_TREND_DAYS, MAX_WINDOW_DAYS,
};
use crate::storage::HabitStorage;
use crate::tools::{parse_user_id, ToolContext, ToolError, UserParams};

/// Parameters for windowed statistics
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WindowParams {
    pub user_id: String,
    /// Number of days ending today, 1 to 365
    pub days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub days: u32,
    pub trends: Vec<TrendPoint>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryCount>,
}

#[derive(Debug, Serialize)]
pub struct MoodStatsResponse {
    pub days: u32,
    pub moods: Vec<MoodCount>,
}

#[derive(Debug, Serialize)]
pub struct BestHabitsResponse {
    pub days: u32,
    pub habits: Vec<HabitPerformance>,
}

fn window(requested: Option<u32>, default: u32) -> Result<u32, ToolError> {
    let days = requested.unwrap_or(default);
    if days == 0 || days > MAX_WINDOW_DAYS {
        return Err(ToolError::InvalidParams(format!(
            "days must be between 1 and {}, got {}",
            MAX_WINDOW_DAYS, days
        )));
    }
    Ok(days)
}

pub fn overview<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: UserParams,
) -> Result<Overview, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    Ok(ctx.analytics.overview(ctx.storage, &user_id)?)
}

pub fn trends<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: WindowParams,
) -> Result<TrendsResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let days = window(params.days, DEFAULT_TREND_DAYS)?;

    Ok(TrendsResponse {
        days,
        trends: ctx.analytics.trends(ctx.storage, &user_id, days)?,
    })
}

pub fn category_breakdown<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: UserParams,
) -> Result<CategoriesResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;

    Ok(CategoriesResponse {
        categories: ctx.analytics.category_breakdown(ctx.storage, &user_id)?,
    })
}

pub fn mood_stats<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: WindowParams,
) -> Result<MoodStatsResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let days = window(params.days, DEFAULT_STATS_DAYS)?;

    Ok(MoodStatsResponse {
        days,
        moods: ctx.analytics.mood_stats(ctx.storage, &user_id, days)?,
    })
}

pub fn best_habits<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: WindowParams,
) -> Result<BestHabitsResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let days = window(params.days, DEFAULT_STATS_DAYS)?;

    Ok(BestHabitsResponse {
        days,
        habits: ctx.analytics.best_habits(ctx.storage, &user_id, days)?,
    })
}
