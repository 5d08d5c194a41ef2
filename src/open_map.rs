//! OpenAddressingMap: linear probing over a flat slot table.

use crate::error::{MapError, Result};
use crate::iter::{IntoIter, Iter, Keys, Values};
use crate::probe::ProbeSeq;
use crate::slot::{empty_table, Slot};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;
use core::ops::Index;
use hashbrown::hash_map::DefaultHashBuilder;

/// Number of slots a map starts with unless told otherwise.
pub const DEFAULT_CAPACITY: usize = 4;

/// A hash map that stores entries directly in a slot table and resolves
/// collisions by linear probing.
///
/// Removal leaves a tombstone behind. Tombstones are never reused by
/// `insert`; they are dropped when the table grows. The table doubles
/// whenever an insert walks every slot without finding a free one or its
/// own key.
#[derive(Clone)]
pub struct OpenAddressingMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    table: Vec<Slot<K, V>>,
    len: usize,
}

/// Slot index a hash lands on in a table of `capacity` slots.
#[inline]
fn home_slot(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

impl<K, V> OpenAddressingMap<K, V, DefaultHashBuilder> {
    /// Creates an empty map with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty map with `capacity` slots.
    ///
    /// Fails with [`MapError::InvalidCapacity`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for OpenAddressingMap<K, V, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> OpenAddressingMap<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            table: empty_table(DEFAULT_CAPACITY),
            len: 0,
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Result<Self> {
        if capacity < 1 {
            return Err(MapError::InvalidCapacity(capacity));
        }
        Ok(Self {
            hasher,
            table: empty_table(capacity),
            len: 0,
        })
    }

    /// Number of slots in the current table. Only grows.
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Live `(key, value)` pairs in unspecified order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.table, self.len)
    }

    /// Live keys in unspecified order. Each key is yielded exactly once.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Live values in unspecified order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    #[cfg(test)]
    pub(crate) fn tombstones(&self) -> usize {
        self.table.iter().filter(|s| s.is_tombstone()).count()
    }
}

impl<K, V, S> OpenAddressingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    fn probe(&self, hash: u64) -> ProbeSeq {
        let capacity = self.capacity();
        ProbeSeq::new(home_slot(hash, capacity), capacity)
    }

    /// Index of the slot holding `q`, if any. Tombstones are walked past; an
    /// empty slot ends the search.
    fn find_index<Q>(&self, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        for idx in self.probe(hash) {
            match &self.table[idx] {
                Slot::Empty => return None,
                Slot::Tombstone => continue,
                Slot::Occupied { hash: h, key, .. } => {
                    if *h == hash && key.borrow() == q {
                        return Some(idx);
                    }
                }
            }
        }
        None
    }

    /// First slot along the probe that is either empty or holds `key`.
    /// Tombstones are skipped, not reused. `None` means the probe wrapped
    /// around without finding either.
    fn insert_slot(&self, hash: u64, key: &K) -> Option<usize> {
        self.probe(hash).find(|&idx| match &self.table[idx] {
            Slot::Empty => true,
            Slot::Tombstone => false,
            Slot::Occupied { hash: h, key: k, .. } => *h == hash && k == key,
        })
    }

    /// Returns a reference to the value stored for `q`.
    ///
    /// Fails with [`MapError::KeyNotFound`] when the key is absent.
    pub fn get<Q>(&self, q: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.find_index(q).ok_or(MapError::KeyNotFound)?;
        match &self.table[idx] {
            Slot::Occupied { value, .. } => Ok(value),
            Slot::Empty | Slot::Tombstone => Err(MapError::KeyNotFound),
        }
    }

    /// Like [`get`](Self::get), but hands back `default` when the key is absent.
    pub fn get_or<'a, Q>(&'a self, q: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).unwrap_or(default)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_index(q).is_some()
    }

    /// Inserts `value` under `key`, growing the table if the probe for `key`
    /// finds neither a free slot nor the key itself.
    ///
    /// Returns the previous value when the key was already present; the
    /// stored key is kept in that case.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        let idx = match self.insert_slot(hash, &key) {
            Some(idx) => idx,
            None => {
                self.grow();
                // The doubled table has an empty slot for every live entry
                // plus one, so this probe cannot come back empty-handed.
                match self.insert_slot(hash, &key) {
                    Some(idx) => idx,
                    None => unreachable!("no free slot after doubling the table"),
                }
            }
        };
        match &mut self.table[idx] {
            Slot::Occupied { value: old, .. } => Some(mem::replace(old, value)),
            slot => {
                *slot = Slot::Occupied { hash, key, value };
                self.len += 1;
                None
            }
        }
    }

    /// Removes `q`, leaving a tombstone in its slot, and returns its value.
    ///
    /// Fails with [`MapError::KeyNotFound`] when the key is absent.
    pub fn remove<Q>(&mut self, q: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let idx = self.find_index(q).ok_or(MapError::KeyNotFound)?;
        let slot = mem::replace(&mut self.table[idx], Slot::Tombstone);
        self.len -= 1;
        slot.into_entry()
            .map(|(_, value)| value)
            .ok_or(MapError::KeyNotFound)
    }

    /// Rebuilds the table at twice the capacity. Live entries are placed
    /// with their stored hash; tombstones are dropped. Neither `K: Hash` nor
    /// `K: Eq` runs here since the carried-over keys are already distinct.
    fn grow(&mut self) {
        let capacity = self.capacity() * 2;
        let mut table = empty_table(capacity);
        for slot in self.table.drain(..) {
            if let Slot::Occupied { hash, key, value } = slot {
                let idx = ProbeSeq::new(home_slot(hash, capacity), capacity)
                    .find(|&i| matches!(table[i], Slot::Empty));
                match idx {
                    Some(idx) => table[idx] = Slot::Occupied { hash, key, value },
                    None => unreachable!("doubled table ran out of empty slots"),
                }
            }
        }
        self.table = table;
    }

    /// Panics if any structural invariant is broken: stored hashes match,
    /// keys are unique, every key is reachable from its home slot without
    /// crossing an empty slot, and the live count is accurate.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let capacity = self.capacity();
        assert!(capacity >= 1, "capacity dropped to zero");
        let live = self.table.iter().filter(|s| s.entry().is_some()).count();
        assert_eq!(live, self.len, "cached len out of sync with table");
        assert!(self.len <= capacity);

        for (i, slot) in self.table.iter().enumerate() {
            let Slot::Occupied { hash, key, .. } = slot else {
                continue;
            };
            assert_eq!(*hash, self.make_hash(key), "stale stored hash at slot {i}");
            for j in self.probe(*hash) {
                if j == i {
                    break;
                }
                assert!(
                    !matches!(self.table[j], Slot::Empty),
                    "slot {i} unreachable: empty slot {j} on its probe"
                );
            }
            for (j, other) in self.table.iter().enumerate().skip(i + 1) {
                if let Some((k, _)) = other.entry() {
                    assert!(k != key, "duplicate key in slots {i} and {j}");
                }
            }
        }
    }
}

impl<K, V, S> IntoIterator for OpenAddressingMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.table, self.len)
    }
}

impl<'a, K, V, S> IntoIterator for &'a OpenAddressingMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, S> Extend<(K, V)> for OpenAddressingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for OpenAddressingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

/// Equal when both maps hold the same key/value pairs. Capacity, hasher
/// state and tombstones do not take part.
impl<K, V, S> PartialEq for OpenAddressingMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .iter()
                .all(|(k, v)| other.get(k).map_or(false, |ov| v == ov))
    }
}

impl<K, V, S> Eq for OpenAddressingMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, Q, V, S> Index<&Q> for OpenAddressingMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    /// Panics when the key is absent.
    fn index(&self, q: &Q) -> &V {
        match self.get(q) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for OpenAddressingMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders `{key: value, ...}` with the `Debug` form of keys and values, in
/// iteration order. Meant for diagnostics, not as a stable format.
impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Display for OpenAddressingMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k:?}: {v:?}")?;
        }
        f.write_str("}")
    }
}
