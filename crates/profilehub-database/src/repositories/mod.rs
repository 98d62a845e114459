//! PostgreSQL repository implementations.

pub mod profile;
pub mod share_link;

pub use profile::ProfileRepository;
pub use share_link::ShareLinkRepository;

use profilehub_core::error::{AppError, ErrorKind};

/// Maps a sqlx failure into the application error space.
///
/// Unique violations become `Conflict`; everything else is reported as
/// the store being unavailable.
pub(crate) fn map_sqlx_error(context: &'static str, err: sqlx::Error) -> AppError {
    let unique = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if unique {
        return AppError::with_source(ErrorKind::Conflict, context, err);
    }
    tracing::error!(error = %err, "{context}");
    AppError::with_source(ErrorKind::StoreUnavailable, context, err)
}
