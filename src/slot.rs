//! Per-slot state of the backing table.

/// One cell of the table.
///
/// `Empty` ends every probe. `Tombstone` marks a removed entry: lookups walk
/// past it and inserts skip it, so it stays put until the next resize.
/// Occupied slots keep the full hash of their key; rehashing reads it instead
/// of calling `K: Hash` again.
#[derive(Clone, Debug)]
pub(crate) enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied { hash: u64, key: K, value: V },
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<K, V> Slot<K, V> {
    #[inline]
    pub(crate) fn entry(&self) -> Option<(&K, &V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    #[inline]
    pub(crate) fn into_entry(self) -> Option<(K, V)> {
        match self {
            Slot::Occupied { key, value, .. } => Some((key, value)),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }
}

/// Allocates `capacity` empty slots.
pub(crate) fn empty_table<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut table = Vec::with_capacity(capacity);
    table.resize_with(capacity, Slot::default);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_table_is_all_empty() {
        let t: Vec<Slot<u8, u8>> = empty_table(5);
        assert_eq!(t.len(), 5);
        assert!(t.iter().all(|s| matches!(s, Slot::Empty)));
    }

    #[test]
    fn only_occupied_slots_expose_an_entry() {
        let occupied: Slot<&str, i32> = Slot::Occupied {
            hash: 7,
            key: "a",
            value: 1,
        };
        assert_eq!(occupied.entry(), Some((&"a", &1)));
        assert!(Slot::<&str, i32>::Empty.entry().is_none());
        assert!(Slot::<&str, i32>::Tombstone.entry().is_none());
        assert!(Slot::<&str, i32>::Tombstone.is_tombstone());
        assert_eq!(occupied.into_entry(), Some(("a", 1)));
    }
}
