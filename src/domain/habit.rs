//! Habit entity and related functionality
//!
//! This module defines the Habit struct that represents something a user
//! wants to do every day, along with validation, partial updates and the
//! completion rule shared by logs and the streak engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Category, DomainError, HabitColor, HabitId, HabitKind, UserId};

/// Icon used when a habit is created without one
pub const DEFAULT_ICON: &str = "✅";

/// A habit represents something the user wants to do every day
///
/// Each habit has a target: a day's log completes the habit when its
/// progress reaches the target. Boolean habits simply use a target of 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub user_id: UserId,
    /// Display name (e.g., "Morning Run", "Drink water")
    pub name: String,
    pub icon: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: HabitKind,
    /// Progress needed for a day to count as completed (>= 1)
    pub target: u32,
    pub color: HabitColor,
    /// Archived habits are kept but ignored by streaks and analytics
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a habit; unset fields take defaults
#[derive(Debug, Clone, Default)]
pub struct NewHabit {
    pub name: String,
    pub icon: Option<String>,
    pub category: Option<Category>,
    pub kind: Option<HabitKind>,
    pub target: Option<u32>,
    pub color: Option<HabitColor>,
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct HabitChanges {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub category: Option<Category>,
    pub kind: Option<HabitKind>,
    pub target: Option<u32>,
    pub color: Option<HabitColor>,
}

impl HabitChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.icon.is_none()
            && self.category.is_none()
            && self.kind.is_none()
            && self.target.is_none()
            && self.color.is_none()
    }
}

impl Habit {
    /// Create a new habit owned by `user_id`, validating every field
    pub fn new(user_id: UserId, draft: NewHabit) -> Result<Self, DomainError> {
        let name = Self::validate_name(&draft.name)?;
        let icon = Self::validate_icon(draft.icon)?;
        let target = draft.target.unwrap_or(1);
        Self::validate_target(target)?;

        let now = Utc::now();
        Ok(Self {
            id: HabitId::new(),
            user_id,
            name,
            icon,
            category: draft.category.unwrap_or_default(),
            kind: draft.kind.unwrap_or_default(),
            target,
            color: draft.color.unwrap_or_default(),
            is_archived: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update
    ///
    /// Everything is validated before anything is written, so a rejected
    /// update leaves the habit untouched.
    pub fn update(&mut self, changes: HabitChanges) -> Result<(), DomainError> {
        let name = changes.name.as_deref().map(Self::validate_name).transpose()?;
        let icon = match changes.icon {
            Some(icon) => Some(Self::validate_icon(Some(icon))?),
            None => None,
        };
        if let Some(target) = changes.target {
            Self::validate_target(target)?;
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(icon) = icon {
            self.icon = icon;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(kind) = changes.kind {
            self.kind = kind;
        }
        if let Some(target) = changes.target {
            self.target = target;
        }
        if let Some(color) = changes.color {
            self.color = color;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Flip the archived flag, returning the new value
    pub fn toggle_archive(&mut self) -> bool {
        self.is_archived = !self.is_archived;
        self.updated_at = Utc::now();
        self.is_archived
    }

    /// Whether `progress` reaches this habit's target
    pub fn is_completed_by(&self, progress: f64) -> bool {
        progress >= f64::from(self.target)
    }

    // Validation helper methods

    fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidName("Habit name is required".to_string()));
        }

        if trimmed.chars().count() > 100 {
            return Err(DomainError::InvalidName(
                "Habit name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(trimmed.to_string())
    }

    fn validate_icon(icon: Option<String>) -> Result<String, DomainError> {
        match icon.map(|i| i.trim().to_string()) {
            None => Ok(DEFAULT_ICON.to_string()),
            Some(icon) if icon.is_empty() => Ok(DEFAULT_ICON.to_string()),
            Some(icon) if icon.chars().count() > 16 => Err(DomainError::Validation {
                message: "Icon cannot be longer than 16 characters".to_string(),
            }),
            Some(icon) => Ok(icon),
        }
    }

    fn validate_target(target: u32) -> Result<(), DomainError> {
        if target == 0 {
            return Err(DomainError::InvalidTarget(
                "Target must be at least 1".to_string(),
            ));
        }
        if target > 10000 {
            return Err(DomainError::InvalidTarget(
                "Target cannot exceed 10000".to_string(),
            ));
        }
        Ok(())
    }
}
