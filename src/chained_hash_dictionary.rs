//! ChainedHashDictionary: separate-chaining hash table over `ArrayDictionary` bins.
//!
//! Layout
//! - `bins` is a `Vec<Option<ArrayDictionary>>`. A slot stays `None` until the
//!   first put lands in it; once materialized it is never individually
//!   dropped, even when emptied by removals.
//! - A key's bin is `|hash as i64| % (bins.len() - 1)`. The modulus is one less
//!   than the bin count, so the last bin is never addressed and stays `None`.
//! - `len` caches the sum of all bin lengths.
//!
//! Growth
//! - After every put, the table doubles its bin count when either the bin just
//!   written holds more than `bin_limit` pairs, or `len / bins >= load_factor`.
//! - Doubling moves every pair into a freshly allocated bin array, recomputing
//!   each index against the new count, then drops the old array.
//! - `bin_limit` starts at `DictConfig::max_bin_len`. When a resize forced by
//!   an overfull bin leaves any bin that received its pairs still at or over
//!   the limit, those keys share a full hash and no bin count can split them;
//!   the limit is then raised to twice that bin's length so later puts into
//!   it do not keep doubling the table.

use crate::array_dictionary::{self, ArrayDictionary};
use crate::config::DictConfig;
use crate::dictionary::Dictionary;
use crate::error::Error;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use hashbrown::hash_map::DefaultHashBuilder;
use log::{debug, trace};

pub struct ChainedHashDictionary<K, V, S = DefaultHashBuilder> {
    hasher: S,
    bins: Vec<Option<ArrayDictionary<K, V>>>,
    len: usize,
    config: DictConfig,
    bin_limit: usize,
}

fn empty_bins<K, V>(count: usize) -> Vec<Option<ArrayDictionary<K, V>>> {
    std::iter::repeat_with(|| None).take(count).collect()
}

impl<K, V> ChainedHashDictionary<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    pub fn with_config(config: DictConfig) -> Result<Self, Error> {
        Self::with_config_and_hasher(config, Default::default())
    }
}

impl<K, V, S> Default for ChainedHashDictionary<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> ChainedHashDictionary<K, V, S> {
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of bins.
    pub fn capacity(&self) -> usize {
        self.bins.len()
    }

    pub fn config(&self) -> &DictConfig {
        &self.config
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            bins: self.bins.iter(),
            current: None,
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            bins: self.bins.iter_mut(),
            current: None,
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Length of every bin in index order; `None` for unmaterialized bins.
    #[cfg(test)]
    pub(crate) fn bin_lens(&self) -> Vec<Option<usize>> {
        self.bins
            .iter()
            .map(|b| b.as_ref().map(ArrayDictionary::len))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn bin_limit(&self) -> usize {
        self.bin_limit
    }
}

impl<K, V, S> ChainedHashDictionary<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        let config = DictConfig::default();
        Self {
            hasher,
            bins: empty_bins(config.initial_capacity),
            len: 0,
            bin_limit: config.max_bin_len,
            config,
        }
    }

    pub fn with_config_and_hasher(config: DictConfig, hasher: S) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            hasher,
            bins: empty_bins(config.initial_capacity),
            len: 0,
            bin_limit: config.max_bin_len,
            config,
        })
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    fn index_for_hash(&self, hash: u64) -> usize {
        let modulus = (self.bins.len() - 1) as u64;
        ((hash as i64).unsigned_abs() % modulus) as usize
    }

    /// Bin that `key` maps to under the current bin count.
    ///
    /// Every key goes through the hasher, including `None` for `Option<_>`
    /// keys; absent keys get no fixed bin 0.
    pub fn bin_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        self.index_for_hash(self.make_hash(key))
    }

    fn bin<Q>(&self, key: &Q) -> Option<&ArrayDictionary<K, V>>
    where
        Q: ?Sized + Hash,
    {
        self.bins[self.bin_index(key)].as_ref()
    }

    fn bin_mut<Q>(&mut self, key: &Q) -> Option<&mut ArrayDictionary<K, V>>
    where
        Q: ?Sized + Hash,
    {
        let i = self.bin_index(key);
        self.bins[i].as_mut()
    }

    pub fn get<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.bin(key).ok_or(Error::KeyNotFound)?.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.bin_mut(key).ok_or(Error::KeyNotFound)?.get_mut(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.bin(key).is_some_and(|b| b.contains_key(key))
    }

    /// Insert or overwrite `key`. Returns the previous value on overwrite.
    /// May double the bin count before returning.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        let index = self.index_for_hash(hash);
        let bin = self.bins[index].get_or_insert_with(|| {
            trace!("materializing bin {}", index);
            ArrayDictionary::new()
        });
        let previous = bin.put(key, value);
        if previous.is_none() {
            self.len += 1;
        }

        let overfull = bin.len() > self.bin_limit;
        let loaded = self.load() >= self.config.load_factor;
        if overfull || loaded {
            debug!(
                "resizing chained dictionary: {} -> {} bins, {} pairs (overfull bin: {}, load: {:.3})",
                self.bins.len(),
                self.bins.len() * 2,
                self.len,
                overfull,
                self.load()
            );
            let hot = overfull.then_some(index);
            let hot_len = self.resize(hot);
            if overfull {
                self.back_off_bin_limit(hot_len);
            }
        }
        previous
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let value = self.bin_mut(key).ok_or(Error::KeyNotFound)?.remove(key)?;
        self.len -= 1;
        Ok(value)
    }

    fn load(&self) -> f64 {
        self.len as f64 / self.bins.len() as f64
    }

    /// Doubles the bin count and rehashes every pair. Returns the length of
    /// the fullest new bin that received pairs from old bin `hot`.
    fn resize(&mut self, hot: Option<usize>) -> usize {
        let new_count = self.bins.len() * 2;
        let old = core::mem::replace(&mut self.bins, empty_bins(new_count));
        let mut targets = Vec::new();
        for (from, bin) in old.into_iter().enumerate() {
            for pair in bin.into_iter().flatten() {
                let (key, value) = pair.into_parts();
                let index = self.bin_index(&key);
                if hot == Some(from) && !targets.contains(&index) {
                    targets.push(index);
                }
                self.bins[index]
                    .get_or_insert_with(ArrayDictionary::new)
                    .push_unique(key, value);
            }
        }
        targets
            .into_iter()
            .filter_map(|i| self.bins[i].as_ref().map(ArrayDictionary::len))
            .max()
            .unwrap_or(0)
    }

    fn back_off_bin_limit(&mut self, hot_len: usize) {
        if hot_len >= self.bin_limit {
            let raised = hot_len.saturating_mul(2);
            debug!(
                "a bin still holds {} pairs after resize; raising per-bin limit {} -> {}",
                hot_len, self.bin_limit, raised
            );
            self.bin_limit = raised;
        }
    }
}

/// Borrowing iterator over all pairs, bin by bin in index order.
///
/// State is the slice iterator over bins still to visit plus the iterator of
/// the bin currently being drained.
pub struct Iter<'a, K, V> {
    bins: core::slice::Iter<'a, Option<ArrayDictionary<K, V>>>,
    current: Option<array_dictionary::Iter<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(item);
            }
            // Unmaterialized bins yield `None` here and are skipped.
            self.current = self.bins.next()?.as_ref().map(ArrayDictionary::iter);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            bins: self.bins.clone(),
            current: self.current.clone(),
            remaining: self.remaining,
        }
    }
}

pub struct IterMut<'a, K, V> {
    bins: core::slice::IterMut<'a, Option<ArrayDictionary<K, V>>>,
    current: Option<array_dictionary::IterMut<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(item);
            }
            self.current = self.bins.next()?.as_mut().map(ArrayDictionary::iter_mut);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator; consumes the table.
pub struct IntoIter<K, V> {
    bins: std::vec::IntoIter<Option<ArrayDictionary<K, V>>>,
    current: Option<array_dictionary::IntoIter<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(pair.into_parts());
            }
            self.current = self.bins.next()?.map(IntoIterator::into_iter);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V, S> IntoIterator for ChainedHashDictionary<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            bins: self.bins.into_iter(),
            current: None,
            remaining: self.len,
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashDictionary<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ChainedHashDictionary<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashDictionary<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashDictionary<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut d = Self::default();
        d.extend(iter);
        d
    }
}

impl<K, V, S> fmt::Debug for ChainedHashDictionary<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Dictionary<K, V> for ChainedHashDictionary<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Iter<'a>
        = Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn get(&self, key: &K) -> Result<&V, Error> {
        ChainedHashDictionary::get(self, key)
    }
    fn put(&mut self, key: K, value: V) -> Option<V> {
        ChainedHashDictionary::put(self, key, value)
    }
    fn remove(&mut self, key: &K) -> Result<V, Error> {
        ChainedHashDictionary::remove(self, key)
    }
    fn contains_key(&self, key: &K) -> bool {
        ChainedHashDictionary::contains_key(self, key)
    }
    fn len(&self) -> usize {
        ChainedHashDictionary::len(self)
    }
    fn iter(&self) -> Self::Iter<'_> {
        ChainedHashDictionary::iter(self)
    }
}

#[cfg(test)]
pub(crate) mod test_hashers {
    use core::hash::{BuildHasher, Hasher};

    /// Every key hashes to 0, so all keys share bin 0.
    #[derive(Clone, Default)]
    pub struct ConstBuildHasher;
    pub struct ConstHasher;
    impl BuildHasher for ConstBuildHasher {
        type Hasher = ConstHasher;
        fn build_hasher(&self) -> Self::Hasher {
            ConstHasher
        }
    }
    impl Hasher for ConstHasher {
        fn write(&mut self, _bytes: &[u8]) {}
        fn finish(&self) -> u64 {
            0
        }
    }

    /// Integer keys hash to themselves, so bin placement is predictable.
    #[derive(Clone, Default)]
    pub struct IdentityBuildHasher;
    #[derive(Default)]
    pub struct IdentityHasher(u64);
    impl BuildHasher for IdentityBuildHasher {
        type Hasher = IdentityHasher;
        fn build_hasher(&self) -> Self::Hasher {
            IdentityHasher(0)
        }
    }
    impl Hasher for IdentityHasher {
        fn write(&mut self, bytes: &[u8]) {
            for b in bytes {
                self.0 = (self.0 << 8) | u64::from(*b);
            }
        }
        fn write_u64(&mut self, n: u64) {
            self.0 = n;
        }
        fn write_i64(&mut self, n: i64) {
            self.0 = n as u64;
        }
        fn finish(&self) -> u64 {
            self.0
        }
    }
}
