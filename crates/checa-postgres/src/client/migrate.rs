//! Embedded migration execution.

use diesel::Connection;
use diesel_migrations::MigrationHarness;

use super::PgConfig;
use crate::{MIGRATIONS, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Applies all pending embedded migrations.
///
/// Migrations run on a dedicated synchronous connection in a blocking task,
/// since the diesel migration harness is not async.
///
/// Returns the versions of the migrations that were applied, oldest first.
pub async fn run_pending_migrations(config: &PgConfig) -> PgResult<Vec<String>> {
    let database_url = config.database_url().to_string();
    let masked_url = config.database_url_masked();

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        database_url = %masked_url,
        "Applying pending migrations"
    );

    let applied = tokio::task::spawn_blocking(move || -> PgResult<Vec<String>> {
        let mut conn = diesel::pg::PgConnection::establish(&database_url)?;

        let versions = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(PgError::Migration)?;

        Ok(versions.iter().map(|v| v.to_string()).collect())
    })
    .await
    .map_err(|e| PgError::Unexpected(format!("Migration task panicked: {}", e).into()))??;

    if applied.is_empty() {
        tracing::info!(target: TRACING_TARGET_MIGRATION, "No pending migrations");
    } else {
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            count = applied.len(),
            versions = ?applied,
            "Applied migrations"
        );
    }

    Ok(applied)
}
