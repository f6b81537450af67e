//! Streak refresh: recompute a user's all-habits streak and cache it

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::User;
use crate::storage::HabitStorage;
use crate::tools::{parse_user_id, ToolContext, ToolError, UserParams};

/// Cached streak values after a refresh attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// False when the computation failed and the previous values were kept
    pub streak_refreshed: bool,
}

/// Response from the streak_refresh tool
#[derive(Debug, Serialize)]
pub struct StreakResponse {
    #[serde(flatten)]
    pub streak: StreakSummary,
    pub message: String,
}

/// Recompute `user`'s streak in memory after a log write
///
/// A failed computation is logged and leaves the cached values alone; the
/// log write that triggered the refresh still stands. The caller persists
/// `user` afterward.
pub(crate) fn refresh_cached_streak<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    user: &mut User,
) -> StreakSummary {
    let streak_refreshed = match ctx.streaks.compute_streak(ctx.storage, &user.id) {
        Ok(current) => {
            user.record_streak(current);
            true
        }
        Err(err) => {
            warn!("Keeping cached streak for user {}: {}", user.id, err);
            false
        }
    };

    StreakSummary {
        current_streak: user.current_streak,
        longest_streak: user.longest_streak,
        streak_refreshed,
    }
}

/// Explicit refresh; unlike the post-write path, failures are reported
pub fn refresh_streak<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: UserParams,
) -> Result<StreakResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let mut user = ctx.storage.get_user(&user_id)?;

    let current = ctx.streaks.compute_streak(ctx.storage, &user.id)?;
    user.record_streak(current);
    ctx.storage.update_user(&user)?;
    info!("Refreshed streak for user {}: {} days", user.id, current);

    let message = match current {
        0 => "Start today and build your streak! 🌱".to_string(),
        1 => "🔥 1 day streak. Keep it going!".to_string(),
        n => format!("🔥 {} day streak!", n),
    };

    Ok(StreakResponse {
        streak: StreakSummary {
            current_streak: user.current_streak,
            longest_streak: user.longest_streak,
            streak_refreshed: true,
        },
        message,
    })
}
