#![cfg(test)]

// Property tests for OpenAddressingMap kept inside the crate so they can
// reach the structural checks (`assert_invariants`, `tombstones`).

use crate::error::MapError;
use crate::open_map::OpenAddressingMap;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

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

// Pool-indexed operations so shrinking walks toward earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    GetOr(usize, i32),
    Contains(String),
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        // Removes are weighted up so tombstones pile up between resizes.
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::GetOr(i, d)),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,4}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => Just(OpI::Iterate),
        ];
        (1usize..=4, proptest::collection::vec(op, 1..80))
            .prop_map(move |(capacity, ops)| (capacity, pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap. After every
// op: len parity, len <= capacity, and the structural invariants (unique
// keys, probe reachability, accurate live count).
fn run_scenario<S: BuildHasher>(
    mut sut: OpenAddressingMap<Key, i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();
    let mut capacity = sut.capacity();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(pool, i);
                let prev = sut.insert(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                prop_assert_eq!(sut.get(&k), Ok(&v));
            }
            OpI::Remove(i) => {
                let k = key_from(pool, i);
                let tombs = sut.tombstones();
                match (sut.remove(&k), model.remove(&k)) {
                    (Ok(v), Some(mv)) => {
                        prop_assert_eq!(v, mv);
                        prop_assert_eq!(sut.tombstones(), tombs + 1);
                    }
                    (Err(MapError::KeyNotFound), None) => {
                        prop_assert_eq!(sut.tombstones(), tombs);
                    }
                    (got, want) => {
                        prop_assert!(false, "remove mismatch: {:?} vs model {:?}", got, want)
                    }
                }
                prop_assert!(!sut.contains_key(&k));
                prop_assert_eq!(sut.get(&k), Err(MapError::KeyNotFound));
            }
            OpI::Get(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.get(&k).ok(), model.get(&k));
            }
            OpI::GetOr(i, d) => {
                let k = key_from(pool, i);
                let want = model.get(&k).copied().unwrap_or(d);
                prop_assert_eq!(*sut.get_or(&k, &d), want);
            }
            OpI::Contains(s) => {
                let has = sut.contains_key(s.as_str());
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<_> = sut.keys().cloned().collect();
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
                prop_assert_eq!(sut.keys().count(), model.len());
                for (k, v) in sut.iter() {
                    prop_assert_eq!(Some(v), model.get(k));
                }
            }
        }

        // Post-conditions after each op
        prop_assert!(sut.capacity() >= capacity, "capacity never shrinks");
        if sut.capacity() != capacity {
            prop_assert_eq!(sut.capacity(), capacity * 2, "growth is one doubling");
            prop_assert_eq!(sut.tombstones(), 0, "growth drops tombstones");
            capacity = sut.capacity();
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.len() <= sut.capacity());
        sut.assert_invariants();
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let sut = OpenAddressingMap::with_capacity(capacity).unwrap();
        run_scenario(sut, &pool, ops)?;
    }
}

// Collision variant using a constant hasher: every key shares one probe
// chain, so tombstones sit between live entries of the same chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
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

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((capacity, pool, ops) in arb_scenario()) {
        let sut = OpenAddressingMap::with_capacity_and_hasher(capacity, ConstBuildHasher).unwrap();
        run_scenario(sut, &pool, ops)?;
    }
}
