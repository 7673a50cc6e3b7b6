pub mod config;
pub mod db;
pub mod error;
pub mod server;

pub use db::Store;
pub use error::FavlistError;
