//! Public library interface for the habit streak server
//!
//! Exports the server type, the domain model and the layers the binary and
//! tests build on: storage, the streak and analytics engines, the tool
//! functions and the MCP stdio front end.

use std::sync::Arc;

use thiserror::Error;

pub mod analytics;
pub mod config;
pub mod domain;
pub mod mcp;
pub mod storage;
pub mod tools;

// Re-export public modules and types
pub use analytics::AnalyticsEngine;
pub use config::{ConfigError, ServerConfig};
pub use domain::*;
pub use storage::{HabitStorage, SqliteStorage, StorageError};
pub use tools::{ToolContext, ToolError};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Habit tracker backend served over MCP
///
/// Owns the SQLite store, the clock, and the engines built on them. Every
/// tool call borrows these through a [`ToolContext`].
pub struct HabitTrackerServer {
    storage: SqliteStorage,
    streaks: StreakEngine,
    analytics: AnalyticsEngine,
    clock: Arc<dyn Clock>,
}

impl HabitTrackerServer {
    /// Open (or create) the configured database and build the server
    pub async fn new(config: &ServerConfig) -> Result<Self, ServerError> {
        config.validate()?;
        let db_path = config.database_path()?;
        tracing::info!("Initializing habit streak server with database: {:?}", db_path);

        let storage = SqliteStorage::new(&db_path)?;
        Ok(Self::with_storage(
            storage,
            Arc::new(SystemClock),
            config.max_lookback_days,
        ))
    }

    /// Build a server around an existing store and clock
    pub fn with_storage(storage: SqliteStorage, clock: Arc<dyn Clock>, max_lookback_days: u32) -> Self {
        Self {
            storage,
            streaks: StreakEngine::new(Arc::clone(&clock), max_lookback_days),
            analytics: AnalyticsEngine::new(Arc::clone(&clock)),
            clock,
        }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// Returns once stdin is closed.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!(
            "Starting MCP server (today is {}, streak lookback {} days)",
            self.clock.today(),
            self.streaks.max_lookback_days()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Borrow everything a tool call needs
    pub fn tool_context(&self) -> ToolContext<'_, SqliteStorage> {
        ToolContext {
            storage: &self.storage,
            streaks: &self.streaks,
            analytics: &self.analytics,
            clock: self.clock.as_ref(),
        }
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    pub fn streaks(&self) -> &StreakEngine {
        &self.streaks
    }

    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }
}
