use crate::item::TodoItem;

/// Predicate over stored records.
///
/// Kept as data rather than a closure so that backends able to evaluate it
/// natively (SQL) can do so; [`ItemFilter::matches`] is the reference
/// semantics every backend must agree with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemFilter {
    /// Every record.
    All,
    /// Records with a present name containing the needle, ignoring case.
    /// An empty needle matches every named record.
    NameContains(String),
}

impl ItemFilter {
    pub fn name_contains(needle: impl Into<String>) -> Self {
        Self::NameContains(needle.into())
    }

    /// Evaluate the filter against a record.
    pub fn matches(&self, item: &TodoItem) -> bool {
        match self {
            Self::All => true,
            Self::NameContains(needle) => match &item.name {
                Some(name) => name.to_lowercase().contains(&needle.to_lowercase()),
                None => false,
            },
        }
    }
}
