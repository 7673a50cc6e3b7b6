use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One stored favorite thing, mirroring a `favorite_things` row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct FavoriteThing {
    pub id: i64,
    pub name: String,
    /// Nullable in the schema. The create path always stores a string, so
    /// `None` only shows up in rows carried over from the legacy schema.
    pub description: Option<String>,
}

impl FavoriteThing {
    /// Selector label shown for this record; the remove endpoint resolves it
    /// back to the id.
    pub fn remove_label(&self) -> String {
        format!("{}: {}", self.id, self.name)
    }
}
