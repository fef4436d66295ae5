//! Apply the module's SQL migrations (embedded from `migrations/`, or a host-supplied directory).

use crate::error::AppError;
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use std::path::Path;

/// Migrations compiled into the crate.
pub fn bundled_migrator() -> Migrator {
    sqlx::migrate!("./migrations")
}

/// Run pending migrations read from `dir` at runtime.
pub async fn apply_migrations(pool: &PgPool, dir: &Path) -> Result<(), AppError> {
    let migrator = Migrator::new(dir).await?;
    run(pool, migrator, &dir.display().to_string()).await
}

/// Run the embedded migrations.
pub async fn apply_bundled_migrations(pool: &PgPool) -> Result<(), AppError> {
    run(pool, bundled_migrator(), "embedded set").await
}

/// Versions applied by other modules sharing the bookkeeping table are ignored.
async fn run(pool: &PgPool, mut migrator: Migrator, source: &str) -> Result<(), AppError> {
    migrator.set_ignore_missing(true);
    let known = migrator.iter().count();
    tracing::info!("applying featured products migrations from {} ({} known)", source, known);
    migrator.run(pool).await?;
    tracing::info!("featured products migrations completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_migrations_are_embedded_in_order() {
        let migrator = bundled_migrator();
        let versions: Vec<i64> = migrator.iter().map(|m| m.version).collect();
        assert_eq!(versions, vec![20240601000000, 20240601000001]);
        let sql: Vec<&str> = migrator.iter().map(|m| &*m.sql).collect();
        assert!(sql[0].contains("featured_products"));
        assert!(sql[1].contains("module_store_settings"));
    }
}
