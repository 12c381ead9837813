//! Generic indexed object table.

use crate::StoreError;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// An ordered table of chain objects, keyed by id.
///
/// All mutation of existing rows goes through [`ObjectTable::modify`], which
/// hands back both the old and the new state so callers can feed external
/// observers.
#[derive(Clone, Debug)]
pub struct ObjectTable<K, V> {
    rows: BTreeMap<K, V>,
}

impl<K, V> Default for ObjectTable<K, V> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone + Debug, V: Clone> ObjectTable<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.rows.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.rows.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Insert a fresh row; rejects keys that already exist.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), StoreError> {
        if self.rows.contains_key(&key) {
            return Err(StoreError::Duplicate(format!("{key:?}")));
        }
        self.rows.insert(key, value);
        Ok(())
    }

    /// Mutate an existing row through a closure, returning the states before
    /// and after the mutation.
    pub fn modify(
        &mut self,
        key: &K,
        f: impl FnOnce(&mut V),
    ) -> Result<(V, V), StoreError> {
        let row = self
            .rows
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(format!("{key:?}")))?;
        let old = row.clone();
        f(row);
        Ok((old, row.clone()))
    }

    /// Iterate rows in key order. Deterministic.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.rows.iter()
    }
}
