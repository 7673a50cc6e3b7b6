//! Pool-backed store handle for the `favorite_things` table.
//!
//! Every operation checks a connection out of the shared pool for the
//! duration of a single statement and hands it back on all exit paths,
//! success or error. Nothing is cached between calls; reads always hit
//! the table.

use sqlx::SqlitePool;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::db::migrate;
use crate::db::models::FavoriteThing;
use crate::db::schema::SQLITE_INIT;
use crate::error::FavlistError;

/// Handle to the favorite-things store. Cheap to clone; clones share the
/// same connection pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens the database at `database_url`, creating the file if missing,
    /// and returns a pooled handle.
    ///
    /// Note: this does not create the table. Run [`Store::migrate`] and then
    /// [`Store::init_schema`] before serving traffic.
    pub async fn connect(database_url: &str) -> Result<Self, FavlistError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
        Ok(Self { pool })
    }

    /// Applies pending startup migrations (see [`migrate`]). Must run before
    /// [`Store::init_schema`], so a legacy table is renamed before the
    /// create-if-absent step could shadow it with a fresh empty one.
    pub async fn migrate(&self) -> Result<(), FavlistError> {
        migrate::run(&self.pool).await
    }

    /// Creates the table if it does not exist yet. Safe to run on every
    /// startup and after [`Store::reset`]; existing rows are untouched.
    pub async fn init_schema(&self) -> Result<(), FavlistError> {
        for statement in SQLITE_INIT.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("database schema initialized");
        Ok(())
    }

    /// Inserts a new favorite thing and returns its id. The name is stored
    /// as given; a name that is empty after trimming is rejected before any
    /// SQL runs.
    pub async fn add(&self, name: &str, description: &str) -> Result<i64, FavlistError> {
        if name.trim().is_empty() {
            return Err(FavlistError::EmptyName);
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO favorite_things (name, description) VALUES (?, ?) RETURNING id",
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        debug!(id, name, "favorite thing added");
        Ok(id)
    }

    /// All stored things, newest (highest id) first.
    pub async fn list(&self) -> Result<Vec<FavoriteThing>, FavlistError> {
        let records = sqlx::query_as::<_, FavoriteThing>(
            "SELECT id, name, description FROM favorite_things ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    /// Deletes the row with the given id and returns the number of rows
    /// affected. An id that is no longer present affects zero rows; that is
    /// not an error.
    pub async fn remove(&self, id: i64) -> Result<u64, FavlistError> {
        let result = sqlx::query("DELETE FROM favorite_things WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let affected = result.rows_affected();
        debug!(id, affected, "favorite thing removed");
        Ok(affected)
    }

    /// Administrative reset: drops the whole table. Every operation fails
    /// afterwards until [`Store::init_schema`] runs again.
    pub async fn reset(&self) -> Result<(), FavlistError> {
        sqlx::query("DROP TABLE IF EXISTS favorite_things")
            .execute(&self.pool)
            .await?;
        warn!("favorite_things table dropped");
        Ok(())
    }
}
