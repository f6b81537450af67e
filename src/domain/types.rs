//! Core types and enums used throughout the domain layer
//!
//! This module defines the ID types and the small closed vocabularies
//! (categories, habit kinds, colors, moods) shared by every entity.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Defines a UUID-backed identifier newtype.
///
/// Each entity gets its own ID type so a habit ID can never be passed where
/// a log ID is expected.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse an ID from its string form (database rows, tool arguments)
            pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s.trim())?))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user profile
    UserId
);
define_id!(
    /// Unique identifier for a habit
    HabitId
);
define_id!(
    /// Unique identifier for a daily habit log
    LogId
);
define_id!(
    /// Unique identifier for a daily mood entry
    MoodId
);

/// Categories for organizing habits into different life areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum Category {
    Health,
    Productivity,
    Mindfulness,
    Fitness,
    Learning,
    Other,
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 6] = [
        Category::Health,
        Category::Productivity,
        Category::Mindfulness,
        Category::Fitness,
        Category::Learning,
        Category::Other,
    ];

    /// Get the display name for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Health => "Health",
            Category::Productivity => "Productivity",
            Category::Mindfulness => "Mindfulness",
            Category::Fitness => "Fitness",
            Category::Learning => "Learning",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownVariant {
                field: "category",
                value: s.to_string(),
            })
    }
}

/// Whether a habit is a yes/no check-off or a counted amount
///
/// Both kinds complete the same way (`progress >= target`); the kind only
/// tells a client how to present the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    Boolean,
    Countable,
}

impl Default for HabitKind {
    fn default() -> Self {
        HabitKind::Boolean
    }
}

impl HabitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitKind::Boolean => "boolean",
            HabitKind::Countable => "countable",
        }
    }
}

impl FromStr for HabitKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "boolean" => Ok(HabitKind::Boolean),
            "countable" => Ok(HabitKind::Countable),
            _ => Err(DomainError::UnknownVariant {
                field: "type",
                value: s.to_string(),
            }),
        }
    }
}

/// Display color for a habit card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HabitColor {
    Blue,
    Green,
    Red,
    Yellow,
    Purple,
    Indigo,
    Pink,
    Gray,
}

impl Default for HabitColor {
    fn default() -> Self {
        HabitColor::Blue
    }
}

impl HabitColor {
    const ALL: [HabitColor; 8] = [
        HabitColor::Blue,
        HabitColor::Green,
        HabitColor::Red,
        HabitColor::Yellow,
        HabitColor::Purple,
        HabitColor::Indigo,
        HabitColor::Pink,
        HabitColor::Gray,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HabitColor::Blue => "blue",
            HabitColor::Green => "green",
            HabitColor::Red => "red",
            HabitColor::Yellow => "yellow",
            HabitColor::Purple => "purple",
            HabitColor::Indigo => "indigo",
            HabitColor::Pink => "pink",
            HabitColor::Gray => "gray",
        }
    }
}

impl FromStr for HabitColor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        HabitColor::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownVariant {
                field: "color",
                value: s.to_string(),
            })
    }
}

/// How the user felt on a given day
///
/// Moods travel as emoji on the wire; their names are accepted as input too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum MoodKind {
    #[serde(rename = "😊")]
    Happy,
    #[serde(rename = "😐")]
    Neutral,
    #[serde(rename = "😔")]
    Sad,
    #[serde(rename = "😡")]
    Angry,
    #[serde(rename = "😴")]
    Tired,
}

impl MoodKind {
    const ALL: [MoodKind; 5] = [
        MoodKind::Happy,
        MoodKind::Neutral,
        MoodKind::Sad,
        MoodKind::Angry,
        MoodKind::Tired,
    ];

    pub fn as_emoji(&self) -> &'static str {
        match self {
            MoodKind::Happy => "😊",
            MoodKind::Neutral => "😐",
            MoodKind::Sad => "😔",
            MoodKind::Angry => "😡",
            MoodKind::Tired => "😴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MoodKind::Happy => "happy",
            MoodKind::Neutral => "neutral",
            MoodKind::Sad => "sad",
            MoodKind::Angry => "angry",
            MoodKind::Tired => "tired",
        }
    }
}

impl FromStr for MoodKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MoodKind::ALL
            .into_iter()
            .find(|m| m.as_emoji() == wanted || m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownVariant {
                field: "mood",
                value: s.to_string(),
            })
    }
}
