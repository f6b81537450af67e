/// JSON-RPC handling of the MCP server, one line at a time
use std::sync::Arc;

use chrono::NaiveDate;
use habit_streak_server::mcp::protocol::error_codes;
use habit_streak_server::mcp::McpServer;
use habit_streak_server::*;
use serde_json::{json, Value};

fn mcp() -> McpServer {
    let storage = SqliteStorage::open_in_memory().expect("in-memory database");
    let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
    McpServer::new(HabitTrackerServer::with_storage(
        storage,
        clock,
        DEFAULT_MAX_LOOKBACK_DAYS,
    ))
}

async fn send(server: &mut McpServer, request: Value) -> Value {
    let response = server
        .process_line(&request.to_string())
        .await
        .expect("request should get a response");
    serde_json::to_value(response).unwrap()
}

/// Call a tool and decode the JSON text it returned
async fn call_tool(server: &mut McpServer, name: &str, arguments: Value) -> (bool, Value) {
    let response = send(
        server,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments},
        }),
    )
    .await;

    let result = &response["result"];
    let text = result["content"][0]["text"].as_str().unwrap();
    (
        result["isError"].as_bool().unwrap(),
        serde_json::from_str(text).unwrap(),
    )
}

#[tokio::test]
async fn test_initialize_handshake() {
    let mut server = mcp();
    let response = send(
        &mut server,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "0.1.0"}
            }
        }),
    )
    .await;

    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
    assert!(response["result"]["capabilities"]["tools"].is_object());

    let notification = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
    assert!(server.process_line(&notification.to_string()).await.is_none());
    assert!(server.is_initialized());
}

#[tokio::test]
async fn test_tools_list_has_schemas() {
    let mut server = mcp();
    let response = send(
        &mut server,
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
    )
    .await;

    let tools = response["result"]["tools"].as_array().unwrap();
    let upsert = tools
        .iter()
        .find(|t| t["name"] == "log_upsert")
        .expect("log_upsert is listed");

    let required = upsert["inputSchema"]["required"].as_array().unwrap();
    for field in ["user_id", "habit_id", "date", "progress"] {
        assert!(required.contains(&json!(field)), "{} should be required", field);
    }
    assert!(tools.iter().any(|t| t["name"] == "streak_refresh"));
}

#[tokio::test]
async fn test_tool_call_round_trip() {
    let mut server = mcp();
    let (is_error, user) = call_tool(
        &mut server,
        "user_register",
        json!({"name": "Quinn", "email": "quinn@example.com"}),
    )
    .await;
    assert!(!is_error);
    let user_id = user["user"]["id"].as_str().unwrap().to_string();

    let (_, habit) = call_tool(
        &mut server,
        "habit_create",
        json!({"user_id": user_id, "name": "Stretch"}),
    )
    .await;
    let habit_id = habit["habit"]["id"].as_str().unwrap().to_string();

    let (is_error, logged) = call_tool(
        &mut server,
        "log_upsert",
        json!({"user_id": user_id, "habit_id": habit_id, "date": "2024-06-15", "progress": 1}),
    )
    .await;
    assert!(!is_error);
    assert_eq!(logged["current_streak"], 1);
}

#[tokio::test]
async fn test_tool_errors_carry_codes() {
    let mut server = mcp();
    let (is_error, body) = call_tool(
        &mut server,
        "user_profile",
        json!({"user_id": UserId::new().to_string()}),
    )
    .await;

    assert!(is_error);
    assert_eq!(body["error"], "USER_NOT_FOUND");
    assert_eq!(body["code"], error_codes::USER_NOT_FOUND);

    let (is_error, body) = call_tool(
        &mut server,
        "log_by_date",
        json!({"user_id": UserId::new().to_string(), "date": "15/06/2024"}),
    )
    .await;
    assert!(is_error);
    assert_eq!(body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_protocol_errors() {
    let mut server = mcp();

    let unknown_method = send(
        &mut server,
        json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"}),
    )
    .await;
    assert_eq!(unknown_method["error"]["code"], error_codes::METHOD_NOT_FOUND);

    let unknown_tool = send(
        &mut server,
        json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "habit_teleport", "arguments": {}}
        }),
    )
    .await;
    assert_eq!(unknown_tool["error"]["code"], error_codes::INVALID_PARAMS);

    let garbage = server.process_line("{not json").await.unwrap();
    let garbage = serde_json::to_value(garbage).unwrap();
    assert_eq!(garbage["error"]["code"], error_codes::PARSE_ERROR);
    assert!(garbage["id"].is_null());

    assert!(server.process_line("   ").await.is_none());
}

#[tokio::test]
async fn test_null_id_still_gets_a_reply() {
    let mut server = mcp();
    let response = send(
        &mut server,
        json!({"jsonrpc": "2.0", "id": null, "method": "ping"}),
    )
    .await;

    assert!(response["id"].is_null());
    assert_eq!(response["result"], json!({}));
}

#[tokio::test]
async fn test_fractional_progress_over_the_wire() {
    let mut server = mcp();
    let (_, user) = call_tool(
        &mut server,
        "user_register",
        json!({"name": "Rowan", "email": "rowan@example.com"}),
    )
    .await;
    let user_id = user["user"]["id"].as_str().unwrap().to_string();

    let (_, habit) = call_tool(
        &mut server,
        "habit_create",
        json!({"user_id": user_id, "name": "Run km", "type": "countable", "target": 5}),
    )
    .await;
    let habit_id = habit["habit"]["id"].as_str().unwrap().to_string();

    let (is_error, logged) = call_tool(
        &mut server,
        "log_upsert",
        json!({"user_id": user_id, "habit_id": habit_id, "date": "2024-06-15", "progress": 5.5}),
    )
    .await;
    assert!(!is_error);
    assert_eq!(logged["log"]["progress"], 5.5);
    assert_eq!(logged["log"]["completed"], true);
}
