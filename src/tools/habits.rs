//! Habit management tools
//!
//! habit_create, habit_list, habit_get, habit_update, habit_delete and
//! habit_archive. Every operation is scoped to the calling user: a habit that
//! exists but belongs to someone else is reported as not found.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Category, Habit, HabitChanges, HabitColor, HabitKind, NewHabit};
use crate::storage::HabitStorage;
use crate::tools::{
    parse_habit_id, parse_user_id, Acknowledgement, ToolContext, ToolError, UserParams,
};

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    pub user_id: String,
    /// Habit name, 1 to 100 characters
    pub name: String,
    /// Emoji shown next to the habit (default ✅)
    pub icon: Option<String>,
    /// Health, Productivity, Mindfulness, Fitness, Learning or Other
    pub category: Option<String>,
    /// "boolean" (done or not) or "countable" (progress toward a target)
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Progress needed to complete the habit for a day, 1 to 10000
    pub target: Option<u32>,
    /// blue, green, red, yellow, purple, indigo, pink or gray
    pub color: Option<String>,
}

/// Parameters identifying one habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HabitParams {
    pub user_id: String,
    pub habit_id: String,
}

/// Parameters for changing a habit; omitted fields keep their value
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateHabitParams {
    pub user_id: String,
    pub habit_id: String,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub target: Option<u32>,
    pub color: Option<String>,
}

/// Response carrying a single habit
#[derive(Debug, Serialize)]
pub struct HabitResponse {
    pub success: bool,
    pub habit: Habit,
    pub message: String,
}

/// Response from listing habits
#[derive(Debug, Serialize)]
pub struct HabitListResponse {
    pub habits: Vec<Habit>,
    pub total_count: usize,
    pub message: String,
}

fn parse_category(raw: Option<String>) -> Result<Option<Category>, ToolError> {
    Ok(raw.map(|s| s.parse::<Category>()).transpose()?)
}

fn parse_kind(raw: Option<String>) -> Result<Option<HabitKind>, ToolError> {
    Ok(raw.map(|s| s.parse::<HabitKind>()).transpose()?)
}

fn parse_color(raw: Option<String>) -> Result<Option<HabitColor>, ToolError> {
    Ok(raw.map(|s| s.parse::<HabitColor>()).transpose()?)
}

pub fn create_habit<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: CreateHabitParams,
) -> Result<HabitResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    ctx.storage.get_user(&user_id)?;

    let habit = Habit::new(
        user_id,
        NewHabit {
            name: params.name,
            icon: params.icon,
            category: parse_category(params.category)?,
            kind: parse_kind(params.kind)?,
            target: params.target,
            color: parse_color(params.color)?,
        },
    )?;
    ctx.storage.create_habit(&habit)?;

    tracing::info!("Created habit {} for user {}", habit.id, habit.user_id);
    Ok(HabitResponse {
        success: true,
        message: format!("✅ Created habit '{}'! Ready to start your streak!", habit.name),
        habit,
    })
}

pub fn list_habits<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: UserParams,
) -> Result<HabitListResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    ctx.storage.get_user(&user_id)?;
    let habits = ctx.storage.list_active_habits(&user_id)?;

    let total_count = habits.len();
    let message = if habits.is_empty() {
        "No habits yet. Create your first one to get started!".to_string()
    } else {
        format!("📋 Found {} active habit(s)", total_count)
    };

    Ok(HabitListResponse {
        habits,
        total_count,
        message,
    })
}

pub fn get_habit<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: HabitParams,
) -> Result<HabitResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let habit_id = parse_habit_id(&params.habit_id)?;
    let habit = ctx.storage.get_habit(&user_id, &habit_id)?;

    Ok(HabitResponse {
        success: true,
        message: format!("{} {}", habit.icon, habit.name),
        habit,
    })
}

pub fn update_habit<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: UpdateHabitParams,
) -> Result<HabitResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let habit_id = parse_habit_id(&params.habit_id)?;

    let changes = HabitChanges {
        name: params.name,
        icon: params.icon,
        category: parse_category(params.category)?,
        kind: parse_kind(params.kind)?,
        target: params.target,
        color: parse_color(params.color)?,
    };
    if changes.is_empty() {
        return Err(ToolError::InvalidParams(
            "At least one field must be provided for update".to_string(),
        ));
    }

    let mut habit = ctx.storage.get_habit(&user_id, &habit_id)?;
    habit.update(changes)?;
    ctx.storage.update_habit(&habit)?;

    Ok(HabitResponse {
        success: true,
        message: format!("✏️ Updated habit '{}'", habit.name),
        habit,
    })
}

/// Remove a habit permanently, along with all of its logs
pub fn delete_habit<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: HabitParams,
) -> Result<Acknowledgement, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let habit_id = parse_habit_id(&params.habit_id)?;
    ctx.storage.delete_habit(&user_id, &habit_id)?;

    tracing::info!("Deleted habit {} for user {}", habit_id, user_id);
    Ok(Acknowledgement::new("Habit deleted"))
}

/// Flip a habit between archived and active
pub fn toggle_archive<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: HabitParams,
) -> Result<HabitResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let habit_id = parse_habit_id(&params.habit_id)?;

    let mut habit = ctx.storage.get_habit(&user_id, &habit_id)?;
    let archived = habit.toggle_archive();
    ctx.storage.update_habit(&habit)?;

    let message = if archived {
        format!("📦 Archived '{}'", habit.name)
    } else {
        format!("♻️ Restored '{}'", habit.name)
    };
    Ok(HabitResponse {
        success: true,
        habit,
        message,
    })
}
