/// Multi-step tool workflows against a database file
use std::sync::Arc;

use chrono::NaiveDate;
use habit_streak_server::storage::UserStore;
use habit_streak_server::tools::dispatch;
use habit_streak_server::*;
use serde_json::{json, Value};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn server(dir: &TempDir) -> HabitTrackerServer {
    let storage = SqliteStorage::new(dir.path().join("habits.db")).expect("open database");
    HabitTrackerServer::with_storage(storage, Arc::new(FixedClock(today())), DEFAULT_MAX_LOOKBACK_DAYS)
}

fn call(server: &HabitTrackerServer, tool: &str, args: Value) -> Value {
    dispatch(&server.tool_context(), tool, args)
        .unwrap_or_else(|e| panic!("{} failed: {}", tool, e))
}

fn register(server: &HabitTrackerServer) -> String {
    let response = call(
        server,
        "user_register",
        json!({"name": "Jamie", "email": "jamie@example.com"}),
    );
    response["user"]["id"].as_str().unwrap().to_string()
}

fn create_habit(server: &HabitTrackerServer, user_id: &str, name: &str, target: u32) -> String {
    let response = call(
        server,
        "habit_create",
        json!({
            "user_id": user_id,
            "name": name,
            "category": "Health",
            "type": if target > 1 { "countable" } else { "boolean" },
            "target": target,
        }),
    );
    response["habit"]["id"].as_str().unwrap().to_string()
}

fn log(server: &HabitTrackerServer, user_id: &str, habit_id: &str, date: &str, progress: u32) -> Value {
    call(
        server,
        "log_upsert",
        json!({
            "user_id": user_id,
            "habit_id": habit_id,
            "date": date,
            "progress": progress,
        }),
    )
}

#[tokio::test]
async fn test_logging_builds_and_caches_streak() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);
    let user_id = register(&server);
    let read = create_habit(&server, &user_id, "Read", 1);
    let water = create_habit(&server, &user_id, "Water", 8);

    for date in ["2024-06-12", "2024-06-13", "2024-06-14"] {
        log(&server, &user_id, &read, date, 1);
        log(&server, &user_id, &water, date, 8);
    }

    // partial progress today keeps yesterday's run
    let partial = log(&server, &user_id, &water, "2024-06-15", 4);
    assert_eq!(partial["current_streak"], 3);
    assert_eq!(partial["streak_refreshed"], true);
    assert_eq!(partial["log"]["completed"], false);

    log(&server, &user_id, &read, "2024-06-15", 1);
    let done = log(&server, &user_id, &water, "2024-06-15", 8);
    assert_eq!(done["current_streak"], 4);
    assert_eq!(done["longest_streak"], 4);

    let profile = call(&server, "user_profile", json!({"user_id": user_id}));
    assert_eq!(profile["user"]["current_streak"], 4);
    assert!(!profile["user"]["last_completion_at"].is_null());
}

#[tokio::test]
async fn test_deleting_a_log_breaks_the_streak_but_not_the_record() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);
    let user_id = register(&server);
    let read = create_habit(&server, &user_id, "Read", 1);

    log(&server, &user_id, &read, "2024-06-13", 1);
    let yesterday = log(&server, &user_id, &read, "2024-06-14", 1);
    assert_eq!(yesterday["current_streak"], 2);

    let log_id = yesterday["log"]["id"].as_str().unwrap();
    let deleted = call(
        &server,
        "log_delete",
        json!({"user_id": user_id, "log_id": log_id}),
    );
    assert_eq!(deleted["current_streak"], 0);
    assert_eq!(deleted["longest_streak"], 2);
}

#[tokio::test]
async fn test_deleting_a_habit_removes_its_logs() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);
    let user_id = register(&server);
    let read = create_habit(&server, &user_id, "Read", 1);
    log(&server, &user_id, &read, "2024-06-15", 1);

    call(&server, "habit_delete", json!({"user_id": user_id, "habit_id": read}));

    let today = call(&server, "log_today", json!({"user_id": user_id}));
    assert_eq!(today["total_count"], 0);

    let missing = dispatch(
        &server.tool_context(),
        "habit_get",
        json!({"user_id": user_id, "habit_id": read}),
    );
    assert!(matches!(
        missing,
        Err(ToolError::Storage(StorageError::HabitNotFound { .. }))
    ));
}

#[tokio::test]
async fn test_archive_then_refresh() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);
    let user_id = register(&server);
    let read = create_habit(&server, &user_id, "Read", 1);
    let run = create_habit(&server, &user_id, "Run", 1);

    for date in ["2024-06-12", "2024-06-13", "2024-06-14"] {
        log(&server, &user_id, &read, date, 1);
    }
    let before = call(&server, "user_profile", json!({"user_id": user_id}));
    assert_eq!(before["user"]["current_streak"], 0);

    let archived = call(&server, "habit_archive", json!({"user_id": user_id, "habit_id": run}));
    assert_eq!(archived["habit"]["is_archived"], true);

    let refreshed = call(&server, "streak_refresh", json!({"user_id": user_id}));
    assert_eq!(refreshed["current_streak"], 3);
}

#[tokio::test]
async fn test_analytics_overview_and_best_habits() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);
    let user_id = register(&server);
    let read = create_habit(&server, &user_id, "Read", 1);
    let run = create_habit(&server, &user_id, "Run", 1);

    log(&server, &user_id, &read, "2024-06-14", 1);
    log(&server, &user_id, &read, "2024-06-15", 1);
    log(&server, &user_id, &run, "2024-06-15", 0);

    let overview = call(&server, "analytics_overview", json!({"user_id": user_id}));
    assert_eq!(overview["total_habits"], 2);
    assert_eq!(overview["completed_today"], 1);
    assert_eq!(overview["completion_rate"], 50);
    assert_eq!(overview["total_completions"], 2);

    let best = call(
        &server,
        "analytics_best_habits",
        json!({"user_id": user_id, "days": 10}),
    );
    assert_eq!(best["habits"][0]["habit"]["name"], "Read");
    assert_eq!(best["habits"][0]["completion_rate"], 20);

    let categories = call(&server, "analytics_categories", json!({"user_id": user_id}));
    assert_eq!(categories["categories"], json!([{"name": "Health", "count": 2}]));
}

#[tokio::test]
async fn test_moods_and_motivation() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);
    let user_id = register(&server);

    call(
        &server,
        "mood_upsert",
        json!({"user_id": user_id, "date": "2024-06-15", "mood": "happy"}),
    );
    call(
        &server,
        "mood_upsert",
        json!({"user_id": user_id, "date": "2024-06-14", "mood": "😊"}),
    );
    call(
        &server,
        "mood_upsert",
        json!({"user_id": user_id, "date": "2024-06-13", "mood": "😴"}),
    );

    let today = call(&server, "mood_today", json!({"user_id": user_id}));
    assert_eq!(today["mood"]["mood"], "😊");

    let stats = call(&server, "analytics_moods", json!({"user_id": user_id}));
    assert_eq!(stats["days"], 30);
    assert_eq!(stats["moods"][0], json!({"mood": "😊", "count": 2}));

    let quote = call(&server, "motivation_quote", Value::Null);
    assert!(quote["quote"].as_str().is_some());
    let tips = call(&server, "motivation_tips", json!({}));
    assert_eq!(tips["tips"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_validation_failures() {
    let dir = TempDir::new().unwrap();
    let server = server(&dir);
    let user_id = register(&server);
    let ctx = server.tool_context();

    let duplicate = dispatch(
        &ctx,
        "user_register",
        json!({"name": "Other", "email": "JAMIE@example.com"}),
    );
    assert!(matches!(
        duplicate,
        Err(ToolError::Storage(StorageError::DuplicateEmail { .. }))
    ));

    let reversed = dispatch(
        &ctx,
        "log_range",
        json!({"user_id": user_id, "start_date": "2024-06-15", "end_date": "2024-06-01"}),
    );
    assert!(matches!(reversed, Err(ToolError::InvalidParams(_))));

    let bad_window = dispatch(&ctx, "analytics_trends", json!({"user_id": user_id, "days": 0}));
    assert!(matches!(bad_window, Err(ToolError::InvalidParams(_))));

    let bad_id = dispatch(&ctx, "habit_list", json!({"user_id": "not-a-uuid"}));
    assert!(matches!(bad_id, Err(ToolError::InvalidParams(_))));

    let missing_field = dispatch(&ctx, "habit_create", json!({"user_id": user_id}));
    assert!(matches!(missing_field, Err(ToolError::InvalidParams(_))));
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let config = ServerConfig {
        database: Some(dir.path().join("habits.db")),
        ..Default::default()
    };

    let user = User::new("Casey".to_string(), "casey@example.com".to_string()).unwrap();
    {
        let first = HabitTrackerServer::new(&config).await.expect("first open");
        first.storage().create_user(&user).unwrap();
    }

    let second = HabitTrackerServer::new(&config).await.expect("second open");
    let stored = second.storage().get_user(&user.id).unwrap();
    assert_eq!(stored.email, "casey@example.com");
}
