//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod database;
pub mod links;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseBackend, DatabaseConfig};
pub use self::links::LinksConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Shareable link settings.
    #[serde(default)]
    pub links: LinksConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the base file at `path` with the `{env}` overlay that sits
    /// next to it and environment variables prefixed with `PROFILEHUB__`.
    /// Missing files are skipped.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let overlay = Path::new(path).with_file_name(env);

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&overlay.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix("PROFILEHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let config = AppConfig::load("config/__missing__", "__missing__").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.links.max_name_length, 100);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_environment_overlay_is_read_next_to_base_file() {
        let base = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/default");

        let production = AppConfig::load(base, "production").unwrap();
        assert_eq!(production.database.backend, DatabaseBackend::Postgres);
        assert_eq!(production.logging.format, "json");

        let development = AppConfig::load(base, "development").unwrap();
        assert_eq!(development.database.backend, DatabaseBackend::Memory);
        assert_eq!(development.logging.format, "pretty");
        assert_eq!(development.links.max_name_length, 100);
    }

    #[test]
    fn test_toml_sections_override_defaults() {
        let raw = r#"
            [server]
            port = 9000

            [database]
            backend = "memory"

            [links]
            public_base_url = "https://profiles.example.com/"
        "#;
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.backend, DatabaseBackend::Memory);
        assert_eq!(config.links.base_url(), "https://profiles.example.com");
    }
}
