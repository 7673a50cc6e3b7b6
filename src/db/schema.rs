//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// Name of the storage table, as it appears in SQL and in user-facing
/// messages.
pub const TABLE_NAME: &str = "favorite_things";

/// SQLite schema includes:
/// - `favorite_things` table (one favorite thing per row)
///
/// `AUTOINCREMENT` keeps ids strictly increasing and never reused after a
/// delete; a plain rowid key may hand the old maximum out again.
pub const SQLITE_INIT: &str = r"
CREATE TABLE IF NOT EXISTS favorite_things (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NULL
);
";
