//! Analytics engine for dashboard aggregations
//!
//! Everything here is simple grouping and counting over records already
//! fetched from storage. Windows end on the clock's today and span `days`
//! days including today.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::{Category, Clock, Habit, HabitId, MoodKind, UserId};
use crate::storage::{HabitStorage, StorageError};

/// Default window for trend charts
pub const DEFAULT_TREND_DAYS: u32 = 7;
/// Default window for mood and best-habit statistics
pub const DEFAULT_STATS_DAYS: u32 = 30;
/// Longest window any analytics query accepts
pub const MAX_WINDOW_DAYS: u32 = 365;
/// How many habits the best-habits ranking returns
const BEST_HABITS_LIMIT: usize = 5;

/// Dashboard headline numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_habits: u32,
    pub completed_today: u32,
    /// Percent of active habits completed today, rounded
    pub completion_rate: u32,
    pub total_completions: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Completion numbers for one day of a trend chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub completed: u32,
    pub total: u32,
    /// Percent, rounded
    pub completion: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub name: Category,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodCount {
    pub mood: MoodKind,
    pub count: u32,
}

/// Minimal habit description carried in rankings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitBrief {
    pub id: HabitId,
    pub name: String,
    pub icon: String,
    pub category: Category,
}

impl From<&Habit> for HabitBrief {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id.clone(),
            name: habit.name.clone(),
            icon: habit.icon.clone(),
            category: habit.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitPerformance {
    pub habit: HabitBrief,
    /// Percent of days in the window the habit was completed, rounded
    pub completion_rate: u32,
    pub completed_days: u32,
}

/// Analytics engine for processing habit data
pub struct AnalyticsEngine {
    clock: Arc<dyn Clock>,
}

impl AnalyticsEngine {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// First day of a `days`-long window ending today
    fn window_start(&self, days: u32) -> NaiveDate {
        self.clock.today() - Duration::days(i64::from(days.max(1)) - 1)
    }

    /// Headline numbers; streak values are the cached ones on the profile
    pub fn overview<S: HabitStorage>(
        &self,
        storage: &S,
        user_id: &UserId,
    ) -> Result<Overview, StorageError> {
        let user = storage.get_user(user_id)?;
        let habits = storage.list_active_habits(user_id)?;
        let today_logs = storage.list_logs(user_id, self.clock.today())?;

        let completed_today = today_logs
            .iter()
            .filter(|log| log.completed && habits.iter().any(|h| h.id == log.habit_id))
            .count() as u32;
        let total_habits = habits.len() as u32;

        Ok(Overview {
            total_habits,
            completed_today,
            completion_rate: percent(completed_today, total_habits),
            total_completions: storage.count_completed_logs(user_id)?,
            current_streak: user.current_streak,
            longest_streak: user.longest_streak,
        })
    }

    /// Daily completion over the last `days` days, oldest first
    pub fn trends<S: HabitStorage>(
        &self,
        storage: &S,
        user_id: &UserId,
        days: u32,
    ) -> Result<Vec<TrendPoint>, StorageError> {
        storage.get_user(user_id)?;
        let habits = storage.list_active_habits(user_id)?;
        let start = self.window_start(days);
        let logs = storage.list_logs_in_range(user_id, start, self.clock.today())?;
        let total = habits.len() as u32;

        let points = start
            .iter_days()
            .take(days.max(1) as usize)
            .map(|date| {
                let completed = logs
                    .iter()
                    .filter(|log| {
                        log.date == date
                            && log.completed
                            && habits.iter().any(|h| h.id == log.habit_id)
                    })
                    .count() as u32;

                TrendPoint {
                    date,
                    completed,
                    total,
                    completion: percent(completed, total),
                }
            })
            .collect();

        Ok(points)
    }

    /// Active habit count per category, empty categories omitted
    pub fn category_breakdown<S: HabitStorage>(
        &self,
        storage: &S,
        user_id: &UserId,
    ) -> Result<Vec<CategoryCount>, StorageError> {
        storage.get_user(user_id)?;
        let mut counts: BTreeMap<Category, u32> = BTreeMap::new();
        for habit in storage.list_active_habits(user_id)? {
            *counts.entry(habit.category).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(name, count)| CategoryCount { name, count })
            .collect())
    }

    /// How often each mood was recorded in the window, most frequent first
    pub fn mood_stats<S: HabitStorage>(
        &self,
        storage: &S,
        user_id: &UserId,
        days: u32,
    ) -> Result<Vec<MoodCount>, StorageError> {
        storage.get_user(user_id)?;
        let moods = storage.list_moods_in_range(user_id, self.window_start(days), self.clock.today())?;

        let mut counts: BTreeMap<MoodKind, u32> = BTreeMap::new();
        for entry in moods {
            *counts.entry(entry.mood).or_default() += 1;
        }

        let mut stats: Vec<MoodCount> = counts
            .into_iter()
            .map(|(mood, count)| MoodCount { mood, count })
            .collect();
        // stable sort keeps declaration order among ties
        stats.sort_by(|a, b| b.count.cmp(&a.count));
        Ok(stats)
    }

    /// Top active habits by completion rate over the window
    pub fn best_habits<S: HabitStorage>(
        &self,
        storage: &S,
        user_id: &UserId,
        days: u32,
    ) -> Result<Vec<HabitPerformance>, StorageError> {
        storage.get_user(user_id)?;
        let habits = storage.list_active_habits(user_id)?;
        let logs = storage.list_logs_in_range(user_id, self.window_start(days), self.clock.today())?;

        let mut ranking: Vec<HabitPerformance> = habits
            .iter()
            .map(|habit| {
                let completed_days = logs
                    .iter()
                    .filter(|log| log.habit_id == habit.id && log.completed)
                    .count() as u32;

                HabitPerformance {
                    habit: HabitBrief::from(habit),
                    completion_rate: percent(completed_days, days.max(1)),
                    completed_days,
                }
            })
            .collect();

        ranking.sort_by(|a, b| b.completion_rate.cmp(&a.completion_rate));
        ranking.truncate(BEST_HABITS_LIMIT);
        Ok(ranking)
    }
}

/// `part / whole` as a rounded percentage; 0 when `whole` is 0
fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((f64::from(part) / f64::from(whole)) * 100.0).round() as u32
}
