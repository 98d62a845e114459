//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use profilehub_core::config::{AppConfig, DatabaseBackend};
use profilehub_core::error::AppError;
use profilehub_database::DatabasePool;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Check that the database is reachable
    Check,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    if config.database.backend == DatabaseBackend::Memory {
        output::print_warning("The memory backend has no schema to migrate.");
        return Ok(());
    }

    let pool = DatabasePool::connect(&config.database).await?;

    let result = match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            profilehub_database::migration::run_migrations(pool.pool()).await?;
            output::print_success("All migrations applied successfully.");
            Ok(())
        }
        MigrateCommand::Check => {
            let latency = pool.ping().await?;
            output::print_success(&format!(
                "Database is reachable ({} ms).",
                latency.as_millis()
            ));
            Ok(())
        }
    };

    pool.close().await;
    result
}
