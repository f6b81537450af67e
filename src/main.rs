//! Main entry point for the habit streak server
//!
//! Parses command line arguments, merges them with the optional config file,
//! sets up logging and starts the MCP server. JSON-RPC travels over
//! stdin/stdout, so all logging goes to stderr.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use habit_streak_server::{HabitTrackerServer, ServerConfig};

/// Command line arguments for the habit streak server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// TOML config file with database, max_lookback_days and log_level
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How many days back the streak scan may look
    #[arg(long)]
    max_lookback_days: Option<u32>,

    /// Log at info level (use --verbose for debug)
    #[arg(short, long)]
    debug: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Layer the command line over the config file
    fn into_config(self) -> Result<ServerConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };

        if let Some(database) = self.database {
            config.database = Some(database);
        }
        if let Some(days) = self.max_lookback_days {
            config.max_lookback_days = days;
        }
        if self.verbose {
            config.log_level = Some("debug".to_string());
        } else if self.debug {
            config.log_level = Some("info".to_string());
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Args::parse().into_config()?;

    // RUST_LOG wins when set; otherwise the configured level, default warn
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = config.log_level.as_deref().unwrap_or("warn");
            EnvFilter::new(format!("habit_streak_server={}", level))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting habit streak server");

    let server = HabitTrackerServer::new(&config).await?;
    server.run().await?;

    info!("Habit streak server shutdown complete");
    Ok(())
}
