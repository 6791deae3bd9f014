use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Bound shared by every state and action type used as a table key.
pub trait Key: Clone + Eq + Hash + Debug {}

impl<T> Key for T where T: Clone + Eq + Hash + Debug {}

/// Stable dense index assignment for arbitrary keys, in first-seen order.
#[derive(Debug, Clone)]
pub struct Interner<T>
where
    T: Key,
{
    items: Vec<T>,
    item_to_index: HashMap<T, usize>,
}

impl<T> Default for Interner<T>
where
    T: Key,
{
    fn default() -> Self {
        Self {
            items: Vec::new(),
            item_to_index: HashMap::new(),
        }
    }
}

impl<T> FromIterator<T> for Interner<T>
where
    T: Key,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut interner = Self::new();
        for item in iter {
            interner.intern(item);
        }
        interner
    }
}

impl<T> Interner<T>
where
    T: Key,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the item if needed and return its dense index.
    pub fn intern(&mut self, item: T) -> usize {
        if let Some(index) = self.item_to_index.get(&item) {
            return *index;
        }

        let index = self.items.len();
        self.items.push(item.clone());
        self.item_to_index.insert(item, index);
        index
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.item_to_index.get(item).copied()
    }

    /// All interned items in index order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
