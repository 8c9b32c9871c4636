//! The mapping capability shared by the bucket store and the hash table.
//!
//! Collaborators such as `ChainedHashSet` depend only on this trait, so any
//! implementation can stand in for the default hash table.

use crate::error::Error;

pub trait Dictionary<K, V> {
    /// Borrowing iterator over `(key, value)` pairs.
    type Iter<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Value stored for `key`, or `Error::KeyNotFound`.
    fn get(&self, key: &K) -> Result<&V, Error>;

    /// Insert or overwrite; returns the previous value on overwrite.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Remove `key` and return its value, or `Error::KeyNotFound` with no
    /// change to the dictionary.
    fn remove(&mut self, key: &K) -> Result<V, Error>;

    fn contains_key(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Self::Iter<'_>;
}
