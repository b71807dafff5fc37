//! In-process key-value store.
//!
//! Used by tests and throwaway sessions. Interior mutability keeps the
//! `&self` contract of `KeyValueStore`; the engine is single-threaded, so a
//! `RefCell` is sufficient.

use super::{KeyValueStore, StoreResult};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
struct Entries {
    next_seq: u64,
    seq_by_key: HashMap<String, u64>,
    by_seq: BTreeMap<u64, (String, String)>,
}

/// Insertion-ordered map living only for the process lifetime.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().by_seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies all entries out in enumeration order.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        self.entries.borrow().by_seq.values().cloned().collect()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.borrow();
        Ok(entries
            .seq_by_key
            .get(key)
            .and_then(|seq| entries.by_seq.get(seq))
            .map(|(_, value)| value.clone()))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut guard = self.entries.borrow_mut();
        let entries = &mut *guard;
        let seq = match entries.seq_by_key.get(key).copied() {
            Some(seq) => seq,
            None => {
                let seq = entries.next_seq;
                entries.next_seq += 1;
                entries.seq_by_key.insert(key.to_string(), seq);
                seq
            }
        };
        entries
            .by_seq
            .insert(seq, (key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.borrow_mut();
        if let Some(seq) = entries.seq_by_key.remove(key) {
            entries.by_seq.remove(&seq);
        }
        Ok(())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self
            .entries
            .borrow()
            .by_seq
            .values()
            .map(|(key, _)| key.clone())
            .collect())
    }
}
