/// Domain rules seen through the public API
use chrono::NaiveDate;
use habit_streak_server::*;

fn user() -> User {
    User::new("Morgan".to_string(), "Morgan@Example.com".to_string()).unwrap()
}

#[test]
fn test_email_is_normalized() {
    assert_eq!(user().email, "morgan@example.com");
}

#[test]
fn test_habit_defaults() {
    let habit = Habit::new(
        user().id,
        NewHabit {
            name: "  Meditate  ".to_string(),
            ..Default::default()
        },
    )
    .unwrap();

    assert_eq!(habit.name, "Meditate");
    assert_eq!(habit.icon, DEFAULT_ICON);
    assert_eq!(habit.category, Category::Other);
    assert_eq!(habit.kind, HabitKind::Boolean);
    assert_eq!(habit.target, 1);
    assert_eq!(habit.color, HabitColor::Blue);
    assert!(!habit.is_archived);
}

#[test]
fn test_target_bounds() {
    let owner = user().id;
    let with_target = |target| {
        Habit::new(
            owner.clone(),
            NewHabit {
                name: "Pages".to_string(),
                target: Some(target),
                ..Default::default()
            },
        )
    };

    assert!(with_target(0).is_err());
    assert!(with_target(1).is_ok());
    assert!(with_target(10_000).is_ok());
    assert!(with_target(10_001).is_err());
}

#[test]
fn test_log_completion_follows_target() {
    let habit = Habit::new(
        user().id,
        NewHabit {
            name: "Water".to_string(),
            kind: Some(HabitKind::Countable),
            target: Some(5),
            ..Default::default()
        },
    )
    .unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let mut log = HabitLog::new(&habit, day, 3.0, Some("halfway".to_string())).unwrap();
    assert!(!log.completed);

    log.record_progress(&habit, 5.0, None).unwrap();
    assert!(log.completed);
    assert_eq!(log.notes.as_deref(), Some("halfway"));
}

#[test]
fn test_notes_length_limit() {
    let habit = Habit::new(
        user().id,
        NewHabit {
            name: "Journal".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    assert!(HabitLog::new(&habit, day, 1.0, Some("x".repeat(500))).is_ok());
    assert!(HabitLog::new(&habit, day, 1.0, Some("x".repeat(501))).is_err());
}

#[test]
fn test_parse_date() {
    assert_eq!(
        parse_date("2024-02-29").unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    );
    assert!(parse_date("2023-02-29").is_err());
    assert!(parse_date("2024-2-9").is_err());
}

#[test]
fn test_mood_wire_format_is_emoji() {
    let value = serde_json::to_value(MoodKind::Happy).unwrap();
    assert_eq!(value, "😊");
    assert_eq!("angry".parse::<MoodKind>().unwrap(), MoodKind::Angry);
}
