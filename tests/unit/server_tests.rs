/// Server construction from configuration
use habit_streak_server::*;
use tempfile::TempDir;

#[test]
fn test_server_opens_configured_database() {
    let dir = TempDir::new().unwrap();
    let config = ServerConfig {
        database: Some(dir.path().join("data").join("habits.db")),
        max_lookback_days: 30,
        log_level: None,
    };

    let server = tokio_test::block_on(HabitTrackerServer::new(&config)).expect("server starts");
    assert_eq!(server.streaks().max_lookback_days(), 30);
    assert!(dir.path().join("data").join("habits.db").exists());
}

#[test]
fn test_zero_lookback_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = ServerConfig {
        database: Some(dir.path().join("habits.db")),
        max_lookback_days: 0,
        log_level: None,
    };

    let result = tokio_test::block_on(HabitTrackerServer::new(&config));
    assert!(matches!(result, Err(ServerError::Config(ConfigError::Invalid(_)))));
}
