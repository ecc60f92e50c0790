use todo_types::TodoItem;

/// Result of a store scan.
///
/// A finite snapshot taken when the scan ran. It can be iterated any number
/// of times by reference, or consumed once by value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemScan {
    items: Vec<TodoItem>,
}

impl ItemScan {
    pub fn new(items: Vec<TodoItem>) -> Self {
        Self { items }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TodoItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<TodoItem> {
        self.items
    }
}

impl FromIterator<TodoItem> for ItemScan {
    fn from_iter<I: IntoIterator<Item = TodoItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ItemScan {
    type Item = TodoItem;
    type IntoIter = std::vec::IntoIter<TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ItemScan {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
