use axum::extract::rejection::JsonRejection;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::db::TABLE_NAME;
use crate::error::FavlistError;
use crate::server::router::FavlistState;
use crate::server::view::{self, ListView, Notice, NoticePage};

/// Request body for `POST /favorites:add`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddForm {
    pub name: String,
    /// May be omitted; an empty description is fine.
    #[serde(default)]
    pub description: String,
}

/// Request body for `POST /favorites:remove`: one of the `"<id>: <name>"`
/// labels from the view's `remove_options`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveForm {
    #[serde(default)]
    pub selection: Option<String>,
}

fn bad_request(hint: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(NoticePage::single(Notice::warning(hint))),
    )
        .into_response()
}

/// GET /favorites
///
/// Renders the current state. Never fails; a broken store shows up as an
/// error notice inside an otherwise empty view.
pub(super) async fn list_view_handler(State(state): State<FavlistState>) -> Json<ListView> {
    Json(view::render(&state.store).await)
}

/// POST /favorites:add
///
/// Stores a new favorite thing and responds with the refreshed view, the
/// confirmation first in `notices`.
pub(super) async fn add_handler(
    State(state): State<FavlistState>,
    payload: Result<Json<AddForm>, JsonRejection>,
) -> Result<Response, FavlistError> {
    let Json(form) = match payload {
        Ok(payload) => payload,
        Err(_) => {
            return Ok(bad_request(
                "Invalid request body: expected JSON like {\"name\":\"...\",\"description\":\"...\"}",
            ));
        }
    };

    state.store.add(&form.name, &form.description).await?;

    let view = view::render(&state.store)
        .await
        .with_outcome(Notice::success(format!(
            "Added to favorites: '{}'!",
            form.name
        )));
    Ok((StatusCode::CREATED, Json(view)).into_response())
}

/// POST /favorites:remove
///
/// Resolves the submitted selector label back to an id, deletes that row
/// and responds with the refreshed view. A label whose id is already gone
/// deletes nothing and still reads as a success.
pub(super) async fn remove_handler(
    State(state): State<FavlistState>,
    payload: Result<Json<RemoveForm>, JsonRejection>,
) -> Result<Response, FavlistError> {
    let Json(form) = match payload {
        Ok(payload) => payload,
        Err(_) => {
            return Ok(bad_request(
                "Invalid request body: expected JSON like {\"selection\":\"<id>: <name>\"}",
            ));
        }
    };

    let selection = form.selection.as_deref().map(str::trim).unwrap_or_default();
    if selection.is_empty() {
        return Err(FavlistError::NoSelection);
    }
    let (id, name) = parse_selection(selection)?;

    state.store.remove(id).await?;

    let view = view::render(&state.store)
        .await
        .with_outcome(Notice::success(format!("Removed thing: '{name}'!")));
    Ok((StatusCode::OK, Json(view)).into_response())
}

/// POST /favorites:reset
///
/// Drops the table. Responds with notices only; there is no list left to
/// render until the schema initializer runs again.
pub(super) async fn reset_handler(
    State(state): State<FavlistState>,
) -> Result<Response, FavlistError> {
    state.store.reset().await?;

    let page = NoticePage {
        notices: vec![
            Notice::success(format!("Table '{TABLE_NAME}' has been dropped.")),
            Notice::info("Restart the service to recreate the schema."),
        ],
    };
    Ok((StatusCode::OK, Json(page)).into_response())
}

/// Splits a `"<id>: <name>"` selector label at the first `": "` and parses
/// the id. The name half is kept for the confirmation message; names may
/// themselves contain `": "`.
fn parse_selection(selection: &str) -> Result<(i64, &str), FavlistError> {
    let Some((id, name)) = selection.split_once(": ") else {
        return Err(FavlistError::InvalidSelection(selection.to_string()));
    };
    match id.trim().parse::<i64>() {
        Ok(id) => Ok((id, name)),
        Err(_) => Err(FavlistError::InvalidSelection(selection.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FavoriteThing;

    #[test]
    fn selection_labels_resolve_back_to_id_and_name() {
        let record = FavoriteThing {
            id: 7,
            name: "Tea: green".to_string(),
            description: None,
        };
        let label = record.remove_label();
        let (id, name) = parse_selection(&label).expect("label should parse");
        assert_eq!(id, 7);
        assert_eq!(name, "Tea: green");
    }

    #[test]
    fn selection_without_separator_is_invalid() {
        assert!(matches!(
            parse_selection("garbage"),
            Err(FavlistError::InvalidSelection(_))
        ));
    }

    #[test]
    fn selection_with_non_numeric_id_is_invalid() {
        assert!(matches!(
            parse_selection("x: thing"),
            Err(FavlistError::InvalidSelection(_))
        ));
    }
}
