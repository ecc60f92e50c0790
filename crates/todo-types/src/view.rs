use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ItemId;
use crate::item::TodoItem;

/// External representation of a todo record.
///
/// This is the only shape that leaves the service, both as an HTTP response
/// body and as the payload sent to the mirror endpoint. Internal fields
/// (`secret`, `version`) have no counterpart here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: ItemId,
    pub name: Option<String>,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub synchronized: bool,
}

impl From<&TodoItem> for ItemView {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            is_complete: item.is_complete,
            created_at: item.created_at,
            updated_at: item.updated_at,
            synchronized: item.synchronized,
        }
    }
}

impl From<TodoItem> for ItemView {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            is_complete: item.is_complete,
            created_at: item.created_at,
            updated_at: item.updated_at,
            synchronized: item.synchronized,
        }
    }
}
