use serde::{Deserialize, Serialize};

/// Body of a create request.
///
/// Clients may also send `isComplete`; it is accepted and ignored because new
/// records always start incomplete.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of an update request.
///
/// `is_complete` is authoritative: an omitted value reads as `false`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_complete: bool,
}
