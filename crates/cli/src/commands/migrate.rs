//! Database migration command.
//!
//! Migration files live in `crates/api/migrations/` and are embedded at
//! compile time; the service itself never runs them on startup.

use super::CommandError;

/// Run all pending database migrations.
///
/// # Errors
///
/// Returns `CommandError` on connection or migration failure.
pub async fn run() -> Result<(), CommandError> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
