//! Database schema migrations
//!
//! Versioned data migrations tracked in the `schema_version` table. Each
//! migration is idempotent, so re-running one against an already-migrated
//! database changes nothing.
//!
//! Never modify an existing migration; add a new one and bump
//! `CURRENT_SCHEMA_VERSION`.

use crate::genres::Genres;
use crate::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Current schema version
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Tables carrying a `genres` column
const GENRE_TABLES: &[&str] = &["venues", "artists"];

/// Get current schema version from database (0 when none recorded)
pub async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    let version: Option<i32> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

async fn set_schema_version(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;

    Ok(())
}

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current_version = get_schema_version(pool).await?;

    if current_version == CURRENT_SCHEMA_VERSION {
        info!("Database schema is up to date (v{})", current_version);
        return Ok(());
    }

    if current_version > CURRENT_SCHEMA_VERSION {
        warn!(
            "Database schema version ({}) is newer than code version ({})",
            current_version, CURRENT_SCHEMA_VERSION
        );
        return Ok(());
    }

    info!(
        "Running database migrations: v{} -> v{}",
        current_version, CURRENT_SCHEMA_VERSION
    );

    if current_version < 1 {
        migrate_v1(pool).await?;
        set_schema_version(pool, 1).await?;
        info!("Migration v1 completed");
    }

    Ok(())
}

/// Migration v1: rewrite array-literal genre values as JSON lists
///
/// Rows imported from older deployments store genres as `{Jazz,"R&B"}`.
/// Rows already holding a JSON array are left alone.
async fn migrate_v1(pool: &SqlitePool) -> Result<()> {
    for table in GENRE_TABLES {
        let rows: Vec<(i64, String)> = sqlx::query_as(&format!("SELECT id, genres FROM {}", table))
            .fetch_all(pool)
            .await?;

        let mut tx = pool.begin().await?;
        let mut converted = 0usize;
        for (id, raw) in rows {
            if !Genres::is_legacy_encoding(&raw) {
                continue;
            }
            sqlx::query(&format!("UPDATE {} SET genres = ? WHERE id = ?", table))
                .bind(Genres::from_stored(&raw).to_stored())
                .bind(id)
                .execute(&mut *tx)
                .await?;
            converted += 1;
        }
        tx.commit().await?;

        if converted > 0 {
            info!("  Converted {} legacy genre values in {}", converted, table);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_memory_database;

    #[tokio::test]
    async fn test_fresh_database_is_current() {
        let pool = init_memory_database().await.unwrap();
        assert_eq!(get_schema_version(&pool).await.unwrap(), CURRENT_SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn test_legacy_genres_converted() {
        let pool = init_memory_database().await.unwrap();

        sqlx::query(
            "INSERT INTO artists (name, city, state, genres) VALUES ('Old Band', 'Austin', 'TX', ?)",
        )
        .bind(r#"{Jazz,"R&B"}"#)
        .execute(&pool)
        .await
        .unwrap();

        migrate_v1(&pool).await.unwrap();

        let stored: String = sqlx::query_scalar("SELECT genres FROM artists WHERE name = 'Old Band'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored, r#"["Jazz","R&B"]"#);

        // Second run is a no-op
        migrate_v1(&pool).await.unwrap();
        let again: String = sqlx::query_scalar("SELECT genres FROM artists WHERE name = 'Old Band'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(again, stored);
    }
}
