// Property tests for ChainedHashDictionary kept inside the crate so they can
// inspect bin layout and the per-bin limit.

use crate::chained_hash_dictionary::test_hashers::ConstBuildHasher;
use crate::chained_hash_dictionary::ChainedHashDictionary;
use crate::config::DictConfig;
use crate::error::Error;
use core::hash::BuildHasher;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,6}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,6}"].prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap.
// Invariants checked after every op:
// - `put` returns the model's previous value; `get`/`remove` agree with the
//   model and report `KeyNotFound` for absent keys.
// - `len` equals the model's size and the sum of bin lengths.
// - the last bin is never materialized.
// - the bin count never shrinks, only doubles, and keeps `len / bins` under
//   the load factor.
// - iteration yields exactly the model's pairs, each once.
fn run_scenario<S>(
    mut sut: ChainedHashDictionary<Key, i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: HashMap<Key, i32> = HashMap::new();
    let mut capacity = sut.capacity();
    let load_factor = sut.config().load_factor;

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = key_from(pool, i);
                let prev = sut.put(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k, v));
            }
            OpI::Remove(i) => {
                let k = key_from(pool, i);
                match model.remove(&k) {
                    Some(mv) => {
                        prop_assert_eq!(sut.remove(&k), Ok(mv));
                    }
                    None => {
                        prop_assert_eq!(sut.remove(&k), Err(Error::KeyNotFound));
                    }
                }
            }
            OpI::Get(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.get(&k).ok(), model.get(&k));
                prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
            }
            OpI::Contains(s) => {
                let has = sut.contains_key(s.as_str());
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(pool, i);
                match (sut.get_mut(&k), model.get_mut(&k)) {
                    (Ok(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (Err(Error::KeyNotFound), None) => {}
                    (s, m) => {
                        prop_assert!(false, "get_mut mismatch: {:?} vs {:?}", s, m);
                    }
                }
            }
            OpI::Iterate => {
                let pairs: Vec<(Key, i32)> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                let keys: BTreeSet<&Key> = pairs.iter().map(|(k, _)| k).collect();
                prop_assert_eq!(keys.len(), pairs.len(), "iteration repeated a key");
                let seen: BTreeMap<Key, i32> = pairs.into_iter().collect();
                let expected: BTreeMap<Key, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(seen, expected);
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.iter().len(), model.len());

        let lens = sut.bin_lens();
        let summed: usize = lens.iter().flatten().sum();
        prop_assert_eq!(summed, sut.len());
        prop_assert_eq!(lens.last().copied().flatten(), None);

        let now = sut.capacity();
        prop_assert!(now == capacity || now == capacity * 2, "{} -> {}", capacity, now);
        capacity = now;
        prop_assert!((sut.len() as f64) / (now as f64) < load_factor);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(ChainedHashDictionary::new(), &pool, ops)?;
    }
}

// Same invariants with every key in one bin and a tiny per-bin limit, so the
// overfull-bin trigger and its back-off run constantly.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let config = DictConfig::new().with_max_bin_len(3);
        let sut = ChainedHashDictionary::with_config_and_hasher(config, ConstBuildHasher)
            .expect("valid config");
        run_scenario(sut, &pool, ops)?;
    }

    // Small starting tables grow through many doublings.
    #[test]
    fn prop_state_machine_from_two_bins((pool, ops) in arb_scenario(), lf in 0.5f64..2.0) {
        let config = DictConfig::new().with_initial_capacity(2).with_load_factor(lf);
        let sut: ChainedHashDictionary<Key, i32> =
            ChainedHashDictionary::with_config(config).expect("valid config");
        run_scenario(sut, &pool, ops)?;
    }
}

// The per-bin limit only ever grows, and only once a resize could not split
// the hot bin.
proptest! {
    #[test]
    fn prop_bin_limit_monotonic(n in 1usize..200, max in 1usize..20) {
        let config = DictConfig::new().with_max_bin_len(max);
        let mut d: ChainedHashDictionary<usize, usize, ConstBuildHasher> =
            ChainedHashDictionary::with_config_and_hasher(config, ConstBuildHasher).unwrap();
        let mut limit = d.bin_limit();
        for k in 0..n {
            d.put(k, k);
            prop_assert!(d.bin_limit() >= limit);
            prop_assert!(d.len() <= d.bin_limit());
            limit = d.bin_limit();
        }
        for k in 0..n {
            prop_assert_eq!(d.get(&k), Ok(&k));
        }
    }
}
