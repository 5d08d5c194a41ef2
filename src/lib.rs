//! probe-map: a single-threaded hash map built on open addressing with
//! linear probing, tombstone deletion and capacity doubling.
//!
//! ```
//! use probe_map::{MapError, OpenAddressingMap};
//!
//! let mut table = OpenAddressingMap::new();
//! table.insert("Name", "George");
//! table.insert("City", "Sofia");
//! assert_eq!(table.get("Name"), Ok(&"George"));
//! assert_eq!(table.remove("City"), Ok("Sofia"));
//! assert_eq!(table.get("City"), Err(MapError::KeyNotFound));
//! assert!(!table.contains_key("City"));
//! assert_eq!(table.to_string(), r#"{"Name": "George"}"#);
//! ```
//!
//! Internal Design:
//!
//! Summary
//! - All entries live in one `Vec` of slots. A slot is `Empty`,
//!   `Tombstone` or `Occupied { hash, key, value }`.
//! - Insert, lookup and remove walk the same probe: start at
//!   `hash mod capacity`, step by one, wrap around, stop after `capacity`
//!   slots.
//!
//! Probe rules
//! - Lookup/remove: tombstone → keep going; empty → not found; equal key →
//!   hit; other key → keep going; lap finished → not found.
//! - Insert: tombstone → keep going; empty → write a new entry; equal key →
//!   overwrite in place; other key → keep going; lap finished → grow and
//!   retry once.
//! - Tombstones are never refilled by insert, so a key is never stored past
//!   an empty slot on its own probe, and never stored twice.
//!
//! Growth
//! - The only resize is a doubling triggered by an insert that finished a
//!   lap. Live entries are moved into a fresh table using their stored
//!   hash; tombstones are dropped. There is no shrink path.
//! - The fresh table is assembled on the side and swapped in whole, and no
//!   user code (`K: Hash`, `K: Eq`) runs while it is built.
//!
//! Constraints
//! - Single-threaded: mutation takes `&mut self`; wrap the whole map in a
//!   lock to share it across threads.
//! - Callers only ever get shared references into slots; there is no
//!   `get_mut` or `iter_mut`.
//! - Iteration order is slot order and carries no meaning.
//!
//! Errors
//! - `MapError::InvalidCapacity` on construction with capacity 0.
//! - `MapError::KeyNotFound` from `get`/`remove`; `get_or` and
//!   `contains_key` turn absence into a default or `false`.

mod error;
mod iter;
mod open_map;
mod open_map_proptest;
mod probe;
mod slot;

// Public surface
pub use error::{MapError, Result};
pub use iter::{IntoIter, Iter, Keys, Values};
pub use open_map::{OpenAddressingMap, DEFAULT_CAPACITY};
