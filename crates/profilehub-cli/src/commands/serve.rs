//! Start the ProfileHub server.

use clap::Args;

use profilehub_core::config::{AppConfig, DatabaseBackend};
use profilehub_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Use the in-memory store instead of PostgreSQL
    #[arg(long)]
    pub memory: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.memory {
        config.database.backend = DatabaseBackend::Memory;
    }

    println!("Starting ProfileHub server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);

    profilehub_api::run_server(config).await
}
