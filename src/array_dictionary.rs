//! ArrayDictionary: flat, unhashed key-value storage used as one bin's chain.
//!
//! Pairs live contiguously in a `Vec`; the logical size is the vector length
//! and the physical capacity starts at `INITIAL_CAPACITY` and doubles when
//! full. Every operation is a linear scan, which is fine because a bin only
//! holds the keys that collide on the table's index function.

use crate::dictionary::Dictionary;
use crate::error::Error;
use crate::kv_pair::KvPair;
use core::borrow::Borrow;
use core::iter::FusedIterator;

const INITIAL_CAPACITY: usize = 10;

#[derive(Clone, Debug)]
pub struct ArrayDictionary<K, V> {
    pairs: Vec<KvPair<K, V>>,
}

impl<K, V> ArrayDictionary<K, V> {
    pub fn new() -> Self {
        Self {
            pairs: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Physical slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.pairs.capacity()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.pairs.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.pairs.iter_mut(),
        }
    }

    /// Append without scanning for a duplicate. Callers guarantee `key` is
    /// not already present (rehash moves pairs that were unique already).
    pub(crate) fn push_unique(&mut self, key: K, value: V) {
        if self.pairs.len() == self.pairs.capacity() {
            // Double explicitly; Vec's own growth policy is unspecified.
            let extra = self.pairs.capacity().max(1);
            self.pairs.reserve_exact(extra);
        }
        self.pairs.push(KvPair::new(key, value));
    }
}

impl<K, V> ArrayDictionary<K, V>
where
    K: Eq,
{
    fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.pairs.iter().position(|p| p.key.borrow() == key)
    }

    pub fn get<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.pairs
            .iter()
            .find(|p| p.key.borrow() == key)
            .map(|p| &p.value)
            .ok_or(Error::KeyNotFound)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.pairs
            .iter_mut()
            .find(|p| p.key.borrow() == key)
            .map(|p| &mut p.value)
            .ok_or(Error::KeyNotFound)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.position(key).is_some()
    }

    /// Overwrite in place when `key` exists (returning the old value),
    /// otherwise append.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.position(&key) {
            Some(i) => Some(core::mem::replace(&mut self.pairs[i].value, value)),
            None => {
                self.push_unique(key, value);
                None
            }
        }
    }

    /// Remove `key`, shifting later pairs left so storage stays gap-free.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let i = self.position(key).ok_or(Error::KeyNotFound)?;
        Ok(self.pairs.remove(i).value)
    }
}

impl<K, V> Default for ArrayDictionary<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the pairs of an `ArrayDictionary` in storage order.
pub struct Iter<'a, K, V> {
    it: core::slice::Iter<'a, KvPair<K, V>>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            it: self.it.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|p| (&p.key, &p.value))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

pub struct IterMut<'a, K, V> {
    it: core::slice::IterMut<'a, KvPair<K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|p| (&p.key, &mut p.value))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator; yields pairs by value.
pub struct IntoIter<K, V> {
    it: std::vec::IntoIter<KvPair<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = KvPair<K, V>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for ArrayDictionary<K, V> {
    type Item = KvPair<K, V>;
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            it: self.pairs.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a ArrayDictionary<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Eq, V> Extend<(K, V)> for ArrayDictionary<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K: Eq, V> FromIterator<(K, V)> for ArrayDictionary<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut d = Self::new();
        d.extend(iter);
        d
    }
}

impl<K: Eq, V> Dictionary<K, V> for ArrayDictionary<K, V> {
    type Iter<'a>
        = Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn get(&self, key: &K) -> Result<&V, Error> {
        ArrayDictionary::get(self, key)
    }
    fn put(&mut self, key: K, value: V) -> Option<V> {
        ArrayDictionary::put(self, key, value)
    }
    fn remove(&mut self, key: &K) -> Result<V, Error> {
        ArrayDictionary::remove(self, key)
    }
    fn contains_key(&self, key: &K) -> bool {
        ArrayDictionary::contains_key(self, key)
    }
    fn len(&self) -> usize {
        ArrayDictionary::len(self)
    }
    fn iter(&self) -> Self::Iter<'_> {
        ArrayDictionary::iter(self)
    }
}
