/// Streak scenarios run against a real SQLite store
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use habit_streak_server::storage::{HabitRepository, LogRepository, UserStore};
use habit_streak_server::*;

struct Scenario {
    storage: SqliteStorage,
    engine: StreakEngine,
    user: User,
    today: NaiveDate,
}

impl Scenario {
    fn new() -> Self {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let storage = SqliteStorage::open_in_memory().expect("in-memory database");
        let user = User::new("Riley".to_string(), "riley@example.com".to_string()).unwrap();
        storage.create_user(&user).unwrap();

        Self {
            storage,
            engine: StreakEngine::new(Arc::new(FixedClock(today)), DEFAULT_MAX_LOOKBACK_DAYS),
            user,
            today,
        }
    }

    fn habit(&self, name: &str, target: u32) -> Habit {
        let habit = Habit::new(
            self.user.id.clone(),
            NewHabit {
                name: name.to_string(),
                kind: Some(if target > 1 {
                    HabitKind::Countable
                } else {
                    HabitKind::Boolean
                }),
                target: Some(target),
                ..Default::default()
            },
        )
        .unwrap();
        self.storage.create_habit(&habit).unwrap();
        habit
    }

    fn log(&self, habit: &Habit, days_ago: i64, progress: f64) {
        let date = self.today - Duration::days(days_ago);
        let log = HabitLog::new(habit, date, progress, None).unwrap();
        self.storage.create_log(&log).unwrap();
    }

    fn streak(&self) -> u32 {
        self.engine
            .compute_streak(&self.storage, &self.user.id)
            .unwrap()
    }
}

#[test]
fn test_no_habits_means_no_streak() {
    let s = Scenario::new();
    assert_eq!(s.streak(), 0);
}

#[test]
fn test_two_habits_three_days_before_today() {
    let s = Scenario::new();
    let a = s.habit("Read", 1);
    let b = s.habit("Run", 1);
    for days_ago in 1..=3 {
        s.log(&a, days_ago, 1.0);
        s.log(&b, days_ago, 1.0);
    }

    assert_eq!(s.streak(), 3);

    s.log(&a, 0, 1.0);
    s.log(&b, 0, 1.0);
    assert_eq!(s.streak(), 4);
}

#[test]
fn test_missing_log_two_days_ago() {
    let s = Scenario::new();
    let a = s.habit("Read", 1);
    let b = s.habit("Run", 1);
    s.log(&a, 1, 1.0);
    s.log(&b, 1, 1.0);
    s.log(&b, 2, 1.0);
    s.log(&a, 3, 1.0);
    s.log(&b, 3, 1.0);

    assert_eq!(s.streak(), 1);
}

#[test]
fn test_gap_yesterday_is_zero() {
    let s = Scenario::new();
    let a = s.habit("Read", 1);
    for days_ago in 2..=6 {
        s.log(&a, days_ago, 1.0);
    }

    assert_eq!(s.streak(), 0);
}

#[test]
fn test_countable_target_of_five() {
    let s = Scenario::new();
    let water = s.habit("Water", 5);
    s.log(&water, 1, 3.0);
    assert_eq!(s.streak(), 0);

    let s = Scenario::new();
    let water = s.habit("Water", 5);
    s.log(&water, 1, 5.0);
    s.log(&water, 2, 7.0);
    assert_eq!(s.streak(), 2);
}

#[test]
fn test_archiving_the_lagging_habit() {
    let s = Scenario::new();
    let a = s.habit("Read", 1);
    let mut b = s.habit("Run", 1);
    for days_ago in 1..=4 {
        s.log(&a, days_ago, 1.0);
    }
    s.log(&b, 1, 1.0);
    assert_eq!(s.streak(), 1);

    b.toggle_archive();
    s.storage.update_habit(&b).unwrap();
    assert_eq!(s.streak(), 4);
}

#[test]
fn test_repeated_computation_is_stable() {
    let s = Scenario::new();
    let a = s.habit("Read", 1);
    s.log(&a, 0, 1.0);
    s.log(&a, 1, 1.0);

    assert_eq!(s.streak(), s.streak());
}

#[test]
fn test_recorded_streak_keeps_longest() {
    let s = Scenario::new();
    let a = s.habit("Read", 1);
    for days_ago in 1..=5 {
        s.log(&a, days_ago, 1.0);
    }

    let mut user = s.storage.get_user(&s.user.id).unwrap();
    user.record_streak(s.streak());
    assert_eq!((user.current_streak, user.longest_streak), (5, 5));

    user.record_streak(2);
    assert_eq!((user.current_streak, user.longest_streak), (2, 5));
    assert!(user.longest_streak >= user.current_streak);
}

#[test]
fn test_lookback_bound_caps_the_count() {
    let s = Scenario::new();
    let a = s.habit("Read", 1);
    for days_ago in 0..20 {
        s.log(&a, days_ago, 1.0);
    }

    let engine = StreakEngine::new(Arc::new(FixedClock(s.today)), 7);
    assert_eq!(engine.compute_streak(&s.storage, &s.user.id).unwrap(), 7);
}
