//! User profile tools: user_register, user_profile, user_update

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::User;
use crate::storage::HabitStorage;
use crate::tools::{parse_user_id, ToolContext, ToolError};

/// Parameters for registering a user
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RegisterUserParams {
    /// Display name, 1 to 100 characters
    pub name: String,
    /// Email address, unique across users
    pub email: String,
}

/// Parameters for tools that only need to know whose data to read
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UserParams {
    /// ID of the user
    pub user_id: String,
}

/// Parameters for updating a profile
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateUserParams {
    pub user_id: String,
    /// New display name
    pub name: Option<String>,
}

/// Response carrying a user profile
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
    pub message: String,
}

pub fn register_user<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: RegisterUserParams,
) -> Result<UserResponse, ToolError> {
    let user = User::new(params.name, params.email)?;
    ctx.storage.create_user(&user)?;

    tracing::info!("Registered user {}", user.id);
    Ok(UserResponse {
        success: true,
        message: format!("👋 Welcome, {}!", user.name),
        user,
    })
}

pub fn get_profile<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: UserParams,
) -> Result<UserResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let user = ctx.storage.get_user(&user_id)?;

    Ok(UserResponse {
        success: true,
        message: format!("🔥 Current streak: {} days", user.current_streak),
        user,
    })
}

pub fn update_user<S: HabitStorage>(
    ctx: &ToolContext<'_, S>,
    params: UpdateUserParams,
) -> Result<UserResponse, ToolError> {
    let user_id = parse_user_id(&params.user_id)?;
    let mut user = ctx.storage.get_user(&user_id)?;

    if let Some(name) = params.name {
        user.rename(name)?;
    }
    ctx.storage.update_user(&user)?;

    Ok(UserResponse {
        success: true,
        message: "Profile updated".to_string(),
        user,
    })
}
