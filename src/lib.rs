//! chained-dict: a single-threaded, separate-chaining hash dictionary built
//! from flat-array buckets.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a hash table whose growth policy is easy to reason about, built in
//!   layers that each carry a small contract.
//! - Layers:
//!   - ArrayDictionary<K, V>: unhashed, gap-free `Vec` of pairs with linear
//!     lookup. Used as the collision chain of one bin.
//!   - ChainedHashDictionary<K, V, S>: array of optional ArrayDictionary bins,
//!     a cached pair count, and a dual-trigger doubling policy.
//!   - Dictionary<K, V>: the mapping trait both layers implement. Collaborators
//!     (ChainedHashSet) only depend on this trait.
//!
//! Constraints
//! - Single-threaded; mutation takes `&mut self`, so no iterator can observe
//!   a structural change mid-walk.
//! - Unique keys; `put` on an existing key overwrites in place.
//! - Every failing operation fails before mutating anything.
//! - Bin count only grows, by doubling; there is no shrinking.
//!
//! Indexing
//! - A key's bin is `|hash as i64| % (bins - 1)`. The last bin is therefore
//!   never addressed and always stays unmaterialized.
//! - Hashes come from the table's `BuildHasher` (default:
//!   `hashbrown`'s `DefaultHashBuilder`) and are recomputed for every key on
//!   resize; they are not cached per entry.
//!
//! Growth
//! - After each put: double when the written bin holds more than the per-bin
//!   limit, or when `len / bins >= load_factor`. Defaults come from
//!   `DictConfig` (16 bins, 0.75, 1000).
//! - Keys that collide on their full hash cannot be separated by any bin
//!   count; when a per-bin resize fails to shrink the hot bin below the
//!   limit, the limit is raised instead of doubling again on every put.
//!
//! Notes and non-goals
//! - No null keys: use `Option<K>` when an absent key is meaningful; `None`
//!   is then hashed like any other key.
//! - No concurrent access, persistence or shrinking.
//! - Resizes are logged at `debug` through the `log` facade; the crate never
//!   installs a logger.

pub mod array_dictionary;
pub mod chained_hash_dictionary;
#[cfg(test)]
mod chained_hash_dictionary_proptest;
pub mod chained_hash_set;
pub mod config;
pub mod dictionary;
pub mod double_linked_list;
mod error;
mod kv_pair;

// Public surface
pub use array_dictionary::ArrayDictionary;
pub use chained_hash_dictionary::ChainedHashDictionary;
pub use chained_hash_set::ChainedHashSet;
pub use config::DictConfig;
pub use dictionary::Dictionary;
pub use double_linked_list::DoubleLinkedList;
pub use error::Error;
pub use kv_pair::KvPair;
