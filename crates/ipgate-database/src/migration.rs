//! Embedded schema migrations.
//!
//! The `users` and `sessions` tables normally belong to the host
//! application; the migrations only create them when they are missing so
//! a standalone deployment has something to read.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use ipgate_core::error::{AppError, ErrorKind};

/// Migrations compiled into the binary from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply all pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!(
        available = MIGRATOR.iter().count(),
        "Applying database migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database schema is up to date");
    Ok(())
}
