//! PostgreSQL pool setup.

use std::fmt;
use std::time::{Duration, Instant};

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use profilehub_core::config::DatabaseConfig;
use profilehub_core::error::{AppError, ErrorKind};
use profilehub_core::result::AppResult;

const URL_SCHEMES: [&str; 2] = ["postgres://", "postgresql://"];

/// Shared handle to the PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open a pool sized and timed by `config`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let url = checked_url(&config.url)?;
        info!(
            url = %Redacted(url),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = pool_options(config).connect(url).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                format!("Could not reach {}", Redacted(url)),
                e,
            )
        })?;

        Ok(Self { pool })
    }

    /// The underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trips a trivial query and reports how long it took.
    pub async fn ping(&self) -> AppResult<Duration> {
        let started = Instant::now();
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::StoreUnavailable, "Ping failed", e))?;
        Ok(started.elapsed())
    }

    /// Waits for checked-out connections and closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
}

fn checked_url(url: &str) -> AppResult<&str> {
    let url = url.trim();
    if url.is_empty() {
        return Err(AppError::configuration(
            "database.url must be set for the postgres backend",
        ));
    }
    if !URL_SCHEMES.iter().any(|s| url.starts_with(s)) {
        return Err(AppError::configuration(
            "database.url must start with postgres:// or postgresql://",
        ));
    }
    Ok(url)
}

/// Displays a connection URL with any password replaced by `****`.
struct Redacted<'a>(&'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (scheme, rest) = self.0.split_once("://").unwrap_or(("", self.0));
        let Some((userinfo, host)) = rest.rsplit_once('@') else {
            return f.write_str(self.0);
        };
        match userinfo.split_once(':') {
            Some((user, _)) => write!(f, "{scheme}://{user}:****@{host}"),
            None => f.write_str(self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_redacted() {
        assert_eq!(
            Redacted("postgres://app:s3cr:et@db:5432/profilehub").to_string(),
            "postgres://app:****@db:5432/profilehub"
        );
        assert_eq!(
            Redacted("postgres://db:5432/profilehub").to_string(),
            "postgres://db:5432/profilehub"
        );
        assert_eq!(
            Redacted("postgres://app@db/profilehub").to_string(),
            "postgres://app@db/profilehub"
        );
    }

    #[test]
    fn test_url_must_be_postgres() {
        assert_eq!(
            checked_url("").unwrap_err().kind,
            ErrorKind::Configuration
        );
        assert_eq!(
            checked_url("mysql://db/app").unwrap_err().kind,
            ErrorKind::Configuration
        );
        assert_eq!(checked_url(" postgresql://db/app ").unwrap(), "postgresql://db/app");
    }

    #[test]
    fn test_min_connections_never_exceed_max() {
        let config = DatabaseConfig {
            max_connections: 4,
            min_connections: 10,
            ..DatabaseConfig::default()
        };
        let options = pool_options(&config);
        assert_eq!(options.get_max_connections(), 4);
        assert_eq!(options.get_min_connections(), 4);
    }

    #[tokio::test]
    async fn test_connect_requires_url() {
        let err = DatabasePool::connect(&DatabaseConfig::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
