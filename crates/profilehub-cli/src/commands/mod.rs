//! CLI command definitions and dispatch.

pub mod links;
pub mod migrate;
pub mod serve;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use profilehub_api::AppState;
use profilehub_core::config::{AppConfig, DatabaseBackend};
use profilehub_core::error::AppError;
use profilehub_core::traits::SystemClock;
use profilehub_database::Stores;

/// ProfileHub: profile pages with shareable links
#[derive(Debug, Parser)]
#[command(name = "profilehub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Configuration overlay, read from the same directory as `--config`
    #[arg(short, long, env = "PROFILEHUB_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the ProfileHub server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Share link management
    Links(links::LinksArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.config, &self.env)?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Links(args) => links::execute(args, config, self.format).await,
        }
    }
}

/// Helper: connect the configured stores and wire the services
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let stores = Stores::connect(&config.database).await?;
    Ok(AppState::new(config, stores, Arc::new(SystemClock)))
}

/// Helper: reject backends whose records do not outlive this process
pub fn require_persistent_backend(config: &AppConfig) -> Result<(), AppError> {
    if config.database.backend == DatabaseBackend::Memory {
        return Err(AppError::configuration(
            "The memory backend keeps no records between runs; \
             set database.backend = \"postgres\" (or PROFILEHUB__DATABASE__BACKEND=postgres)",
        ));
    }
    Ok(())
}
