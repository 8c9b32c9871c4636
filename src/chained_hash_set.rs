//! ChainedHashSet: a set stored as `element -> true` in any `Dictionary`.

use crate::chained_hash_dictionary::ChainedHashDictionary;
use crate::dictionary::Dictionary;
use crate::error::Error;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;

pub struct ChainedHashSet<T, D = ChainedHashDictionary<T, bool>> {
    map: D,
    _pd: PhantomData<T>,
}

impl<T, D> ChainedHashSet<T, D>
where
    D: Dictionary<T, bool> + Default,
{
    pub fn new() -> Self {
        Self::from_dictionary(D::default())
    }
}

impl<T, S> ChainedHashSet<T, ChainedHashDictionary<T, bool, S>>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_dictionary(ChainedHashDictionary::with_hasher(hasher))
    }
}

impl<T, D> ChainedHashSet<T, D>
where
    D: Dictionary<T, bool>,
{
    /// Wrap an existing dictionary. Values already stored in it are ignored;
    /// only its keys count as elements.
    pub fn from_dictionary(map: D) -> Self {
        Self {
            map,
            _pd: PhantomData,
        }
    }

    /// Add `item`; returns `true` if it was not already present.
    pub fn add(&mut self, item: T) -> bool {
        self.map.put(item, true).is_none()
    }

    /// Remove `item`, or fail with `Error::ElementNotFound`.
    pub fn remove(&mut self, item: &T) -> Result<(), Error> {
        match self.map.remove(item) {
            Ok(_) => Ok(()),
            Err(Error::KeyNotFound) => Err(Error::ElementNotFound),
            Err(e) => Err(e),
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.map.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T, D> {
        Iter {
            inner: self.map.iter(),
        }
    }

    pub fn into_dictionary(self) -> D {
        self.map
    }
}

impl<T, D> Default for ChainedHashSet<T, D>
where
    D: Dictionary<T, bool> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the elements of a `ChainedHashSet`.
pub struct Iter<'a, T: 'a, D: Dictionary<T, bool> + 'a> {
    inner: D::Iter<'a>,
}

impl<'a, T: 'a, D: Dictionary<T, bool> + 'a> Iterator for Iter<'a, T, D> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T: 'a, D: Dictionary<T, bool> + 'a> IntoIterator for &'a ChainedHashSet<T, D> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, D>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, D> Extend<T> for ChainedHashSet<T, D>
where
    D: Dictionary<T, bool>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T, D> FromIterator<T> for ChainedHashSet<T, D>
where
    D: Dictionary<T, bool> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

impl<T, D> fmt::Debug for ChainedHashSet<T, D>
where
    T: fmt::Debug,
    D: Dictionary<T, bool>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
