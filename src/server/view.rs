//! The rendered state returned to clients: records, remove selector labels
//! and user-facing notices.

use serde::{Deserialize, Serialize};

use crate::db::{FavoriteThing, Store};

/// Kinds of user-facing signals the rendering surface knows about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
    Info,
}

/// One user-facing signal with its message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

/// Response body for endpoints that render no record list (reset and
/// request rejections).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticePage {
    pub notices: Vec<Notice>,
}

impl NoticePage {
    pub fn single(notice: Notice) -> Self {
        Self {
            notices: vec![notice],
        }
    }
}

/// The whole rendered state.
///
/// Rebuilt from a fresh table read on every request; nothing is cached or
/// patched in place between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListView {
    /// Stored things, newest first.
    pub records: Vec<FavoriteThing>,
    /// `"<id>: <name>"` labels accepted by the remove endpoint, in the same
    /// order as `records`.
    pub remove_options: Vec<String>,
    pub notices: Vec<Notice>,
}

impl ListView {
    /// Prepends the outcome notice of the operation that triggered this
    /// render, so it sorts before any empty-state hints.
    pub fn with_outcome(mut self, notice: Notice) -> Self {
        self.notices.insert(0, notice);
        self
    }
}

/// Empty-state hint for the record list.
pub const EMPTY_LIST_MESSAGE: &str = "You don't have any favorite things yet. Add something first!";
/// Empty-state hint for the remove selector.
pub const NOTHING_TO_REMOVE_MESSAGE: &str = "The list is empty, nothing to remove.";

/// Renders the current table state. A failed read degrades to an empty view
/// with the failure attached as an error notice; rendering itself never
/// fails.
pub async fn render(store: &Store) -> ListView {
    match store.list().await {
        Ok(records) => {
            let remove_options = records.iter().map(FavoriteThing::remove_label).collect();
            let notices = if records.is_empty() {
                vec![
                    Notice::info(EMPTY_LIST_MESSAGE),
                    Notice::info(NOTHING_TO_REMOVE_MESSAGE),
                ]
            } else {
                Vec::new()
            };
            ListView {
                records,
                remove_options,
                notices,
            }
        }
        Err(err) => ListView {
            records: Vec::new(),
            remove_options: Vec::new(),
            notices: vec![err.to_notice()],
        },
    }
}
