//! Database module: the `favorite_things` table and everything that touches
//! it.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `store.rs`: pool-backed handle exposing the table operations
//! - `migrate.rs`: versioned startup migrations

pub mod migrate;
pub mod models;
pub mod schema;
pub mod store;

pub use models::FavoriteThing;
pub use schema::{SQLITE_INIT, TABLE_NAME};
pub use store::Store;
