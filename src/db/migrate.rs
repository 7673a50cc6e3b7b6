//! Startup schema migrations, tracked with `PRAGMA user_version`.
//!
//! Each migration is guarded by the version stored in the database file and
//! applied at most once; running the list again on any later startup is a
//! no-op. New migrations append a guarded block with the next version.

use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::db::schema::TABLE_NAME;
use crate::error::FavlistError;

/// Schema version this build expects. [`run`] migrates older databases up
/// to it.
pub const SCHEMA_VERSION: i32 = 1;

/// Table name used before the big rename.
const LEGACY_TABLE_NAME: &str = "favorites";
/// Column names used before the big rename, paired with their current names.
const LEGACY_COLUMNS: [(&str, &str); 2] = [("title", "name"), ("details", "description")];

pub(crate) async fn run(pool: &SqlitePool) -> Result<(), FavlistError> {
    let version = current_version(pool).await?;

    // Migration 1: rename the legacy table and columns in place, keeping
    // all row data.
    if version < 1 {
        rename_legacy_schema(pool).await?;
        set_version(pool, 1).await?;
        info!(from_version = version, "applied migration 1: legacy schema rename");
    }

    Ok(())
}

async fn current_version(pool: &SqlitePool) -> Result<i32, FavlistError> {
    let version: i32 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;
    Ok(version)
}

async fn set_version(pool: &SqlitePool, version: i32) -> Result<(), FavlistError> {
    // PRAGMA takes no bind parameters.
    sqlx::query(&format!("PRAGMA user_version = {version}"))
        .execute(pool)
        .await?;
    Ok(())
}

/// Renames `favorites(title, details)` to `favorite_things(name,
/// description)`, whichever parts of the old naming are still present.
/// A database where both the legacy and the current table exist is
/// ambiguous and refused.
async fn rename_legacy_schema(pool: &SqlitePool) -> Result<(), FavlistError> {
    let legacy = table_exists(pool, LEGACY_TABLE_NAME).await?;
    let current = table_exists(pool, TABLE_NAME).await?;

    if legacy && current {
        return Err(FavlistError::Migration(format!(
            "both '{LEGACY_TABLE_NAME}' and '{TABLE_NAME}' tables exist; \
             cannot tell which one holds the data"
        )));
    }

    if legacy {
        sqlx::query(&format!(
            "ALTER TABLE {LEGACY_TABLE_NAME} RENAME TO {TABLE_NAME}"
        ))
        .execute(pool)
        .await?;
        info!(from = LEGACY_TABLE_NAME, to = TABLE_NAME, "renamed legacy table");
    } else if !current {
        // Fresh database: nothing to rename, the schema initializer will
        // create the table.
        return Ok(());
    }

    let columns = table_columns(pool).await?;
    for (old, new) in LEGACY_COLUMNS {
        if columns.iter().any(|c| c == old) && !columns.iter().any(|c| c == new) {
            sqlx::query(&format!(
                "ALTER TABLE {TABLE_NAME} RENAME COLUMN {old} TO {new}"
            ))
            .execute(pool)
            .await?;
            info!(from = old, to = new, "renamed legacy column");
        }
    }

    Ok(())
}

async fn table_exists(pool: &SqlitePool, name: &str) -> Result<bool, FavlistError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

async fn table_columns(pool: &SqlitePool) -> Result<Vec<String>, FavlistError> {
    let rows = sqlx::query(&format!("PRAGMA table_info({TABLE_NAME})"))
        .fetch_all(pool)
        .await?;
    Ok(rows
        .iter()
        .map(|row| row.get::<String, _>("name"))
        .collect())
}
