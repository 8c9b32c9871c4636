//! KvPair: owned key-value carrier.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KvPair<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> KvPair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for KvPair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl<K, V> From<KvPair<K, V>> for (K, V) {
    fn from(pair: KvPair<K, V>) -> Self {
        pair.into_parts()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for KvPair<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
