//! Value and visit-count tables.
//!
//! Both tables are pre-populated over the whole key domain when created,
//! so every lookup during training is a hit and nothing is inserted at
//! runtime.

use rustc_hash::FxHashMap;

use super::key::{StateActionKey, KEY_COUNT};

/// A mapping from every [`StateActionKey`] to a `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct StateActionTable<T> {
    entries: FxHashMap<StateActionKey, T>,
}

/// Estimated return for each state-action pair.
pub type QTable = StateActionTable<f64>;

/// Number of updates applied to each state-action pair.
pub type VisitCounts = StateActionTable<u64>;

impl<T: Copy + Default> StateActionTable<T> {
    /// Create a table with every key set to `T::default()`.
    pub fn new() -> Self {
        Self::filled(T::default())
    }

    /// Look up a key. Keys outside the domain read as `T::default()`.
    #[must_use]
    pub fn get(&self, key: &StateActionKey) -> T {
        self.entries.get(key).copied().unwrap_or_default()
    }

    /// Mutable access to a key's entry. `None` for keys outside the table.
    pub fn get_mut(&mut self, key: StateActionKey) -> Option<&mut T> {
        self.entries.get_mut(&key)
    }
}

impl<T: Copy + Default> Default for StateActionTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> StateActionTable<T> {
    /// Create a table with every key set to `value`.
    pub fn filled(value: T) -> Self {
        let mut entries = FxHashMap::default();
        entries.reserve(KEY_COUNT);
        entries.extend(StateActionKey::all().map(|key| (key, value)));
        Self { entries }
    }

    /// Build a table from explicit entries (used when loading).
    pub fn from_entries(entries: impl IntoIterator<Item = (StateActionKey, T)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Overwrite one entry. Keys outside the table are ignored and
    /// reported as `false`.
    pub fn set(&mut self, key: StateActionKey, value: T) -> bool {
        match self.entries.get_mut(&key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, key: &StateActionKey) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&StateActionKey, &T)> {
        self.entries.iter()
    }

    /// Entries sorted by key, for stable output.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(StateActionKey, T)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        entries
    }
}
