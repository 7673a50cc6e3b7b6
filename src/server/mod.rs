//! HTTP surface: router, request handlers and the rendered view document.

pub mod handlers;
pub mod router;
pub mod view;

pub use router::{FavlistState, favlist_router};
