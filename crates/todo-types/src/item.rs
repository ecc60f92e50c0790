use chrono::{DateTime, Utc};

use crate::id::ItemId;

/// A persisted todo record.
///
/// Carries two fields that never cross the service boundary: `secret`, an
/// internal annotation, and `version`, the row version the store uses for
/// optimistic concurrency. Use [`crate::ItemView`] for anything client-facing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoItem {
    pub id: ItemId,
    pub name: Option<String>,
    pub is_complete: bool,
    pub secret: Option<String>,
    /// Set once when the record is first persisted.
    pub created_at: DateTime<Utc>,
    /// `None` until the first successful update.
    pub updated_at: Option<DateTime<Utc>>,
    /// Only ever moves from `false` to `true`.
    pub synchronized: bool,
    /// Starts at 1 and is bumped by every lifecycle update.
    pub version: u64,
}

impl TodoItem {
    /// Apply a lifecycle update in place and bump the row version.
    ///
    /// `synchronized` and `created_at` are left alone; they are owned by the
    /// sync attempter and the creation path respectively.
    pub fn apply(&mut self, changes: &ItemChanges) {
        if let Some(name) = &changes.name {
            self.name = Some(name.clone());
        }
        self.is_complete = changes.is_complete;
        self.updated_at = Some(changes.updated_at);
        self.version += 1;
    }
}

/// A record that has not been persisted yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewItem {
    pub name: Option<String>,
    pub is_complete: bool,
    pub secret: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub synchronized: bool,
}

impl NewItem {
    /// A fresh, incomplete, unsynchronized record created at `created_at`.
    pub fn new(name: Option<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            name,
            is_complete: false,
            secret: None,
            created_at,
            updated_at: None,
            synchronized: false,
        }
    }

    /// Bind the store-assigned identity, producing the first version of the record.
    pub fn into_item(self, id: ItemId) -> TodoItem {
        TodoItem {
            id,
            name: self.name,
            is_complete: self.is_complete,
            secret: self.secret,
            created_at: self.created_at,
            updated_at: self.updated_at,
            synchronized: self.synchronized,
            version: 1,
        }
    }
}

/// The field set written by a lifecycle update.
///
/// `name: None` means "keep the stored name".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub is_complete: bool,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn new_item_defaults() {
        let item = NewItem::new(Some("Buy milk".into()), at(100));
        assert!(!item.is_complete);
        assert!(!item.synchronized);
        assert!(item.updated_at.is_none());
        assert!(item.secret.is_none());
    }

    #[test]
    fn into_item_starts_at_version_one() {
        let item = NewItem::new(None, at(100)).into_item(ItemId::new(9));
        assert_eq!(item.id, ItemId::new(9));
        assert_eq!(item.version, 1);
        assert_eq!(item.created_at, at(100));
    }

    #[test]
    fn apply_overwrites_mutable_fields_and_bumps_version() {
        let mut item = NewItem::new(Some("old".into()), at(100)).into_item(ItemId::new(1));
        item.synchronized = true;
        item.apply(&ItemChanges {
            name: Some("new".into()),
            is_complete: true,
            updated_at: at(200),
        });
        assert_eq!(item.name.as_deref(), Some("new"));
        assert!(item.is_complete);
        assert_eq!(item.updated_at, Some(at(200)));
        assert_eq!(item.created_at, at(100));
        assert!(item.synchronized);
        assert_eq!(item.version, 2);
    }

    #[test]
    fn apply_without_name_keeps_name() {
        let mut item = NewItem::new(Some("keep".into()), at(100)).into_item(ItemId::new(1));
        item.apply(&ItemChanges {
            name: None,
            is_complete: false,
            updated_at: at(150),
        });
        assert_eq!(item.name.as_deref(), Some("keep"));
        assert_eq!(item.updated_at, Some(at(150)));
    }
}
