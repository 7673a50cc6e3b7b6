use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error as ThisError;

use crate::server::view::{Notice, NoticePage};

#[derive(Debug, ThisError)]
pub enum FavlistError {
    /// Create was asked to store a blank name.
    #[error("Thing name cannot be empty.")]
    EmptyName,

    /// Remove ran with no selection made.
    #[error("No thing selected for removal.")]
    NoSelection,

    /// Remove got a selection label that does not look like `<id>: <name>`.
    #[error("Invalid selection: '{0}'")]
    InvalidSelection(String),

    /// Startup migration refused to proceed rather than guess which table
    /// holds the data.
    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl FavlistError {
    /// Validation failures are rejected before any SQL runs and surface as
    /// warnings; everything else reached the store and surfaces as an error.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyName | Self::NoSelection | Self::InvalidSelection(_)
        )
    }

    /// The notice this failure renders as.
    pub fn to_notice(&self) -> Notice {
        if self.is_validation() {
            Notice::warning(self.to_string())
        } else {
            Notice::error(self.to_string())
        }
    }
}

impl IntoResponse for FavlistError {
    fn into_response(self) -> axum::response::Response {
        let status = if self.is_validation() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(NoticePage::single(self.to_notice()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::view::NoticeKind;

    #[test]
    fn validation_failures_surface_as_warnings() {
        let notice = FavlistError::EmptyName.to_notice();
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert_eq!(notice.message, "Thing name cannot be empty.");

        let notice = FavlistError::NoSelection.to_notice();
        assert_eq!(notice.kind, NoticeKind::Warning);
    }

    #[test]
    fn store_failures_surface_as_errors_with_the_cause() {
        let err = FavlistError::from(sqlx::Error::PoolClosed);
        assert!(!err.is_validation());

        let notice = err.to_notice();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.starts_with("Database error:"));

        let notice = FavlistError::Migration("both tables exist".to_string()).to_notice();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Migration error: both tables exist");
    }
}
