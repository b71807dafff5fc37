//! Tombstone set for deleted seed tasks.
//!
//! # Responsibility
//! - Track ids of seed-originated tasks the user deleted.
//! - Encode the set as a JSON array and decode both that and the older
//!   `", "`-joined string form.
//! - Never fail to decode: an unreadable value falls back to the older form.
//!
//! # Invariants
//! - Only ids of `from_file` records are ever inserted (enforced by callers
//!   in the mutation path).
//! - Encoding is deterministic: ids are sorted and unique.

use crate::model::task::TaskId;
use log::debug;
use std::collections::BTreeSet;

/// Separator written by older clients between ids.
const LEGACY_SEPARATOR: &str = ", ";

/// Set of deleted seed-task ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TombstoneSet {
    ids: BTreeSet<TaskId>,
}

impl TombstoneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an id. Returns `false` when it was already present.
    pub fn insert(&mut self, id: impl Into<TaskId>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Serializes to a JSON array of ids.
    pub fn encode(&self) -> String {
        // A sequence of strings cannot fail to serialize.
        serde_json::to_string(&self.ids).unwrap_or_else(|_| "[]".to_string())
    }

    /// Parses either a JSON array of ids or the legacy `"a, b, c"` form.
    ///
    /// An empty (or whitespace only) value is the empty set. A value that
    /// looks like an array but is not an array of strings is read in the
    /// legacy form, so a stored id such as `[1]` never blocks startup.
    pub fn decode(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Self::new();
        }
        if trimmed.starts_with('[') {
            match serde_json::from_str::<Vec<TaskId>>(trimmed) {
                Ok(ids) => return ids.into_iter().collect(),
                Err(err) => debug!(
                    "event=tombstone_decode module=model status=fallback reason=not_an_id_array error={err}"
                ),
            }
        }

        value
            .split(LEGACY_SEPARATOR)
            .map(str::to_string)
            .collect()
    }
}

impl FromIterator<TaskId> for TombstoneSet {
    fn from_iter<I: IntoIterator<Item = TaskId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().filter(|id| !id.is_empty()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TombstoneSet;

    #[test]
    fn empty_string_decodes_to_empty_set() {
        assert!(TombstoneSet::decode("").is_empty());
        assert!(TombstoneSet::decode("  ").is_empty());
    }

    #[test]
    fn legacy_form_splits_on_comma_space_only() {
        let set = TombstoneSet::decode("a, b, a");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "b"]);

        let set = TombstoneSet::decode("x,y, z ");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["x,y", "z "]);
    }

    #[test]
    fn encode_is_sorted_json_array() {
        let mut set = TombstoneSet::new();
        set.insert("b");
        set.insert("a");
        assert!(!set.insert("a"));
        assert_eq!(set.encode(), r#"["a","b"]"#);
        assert_eq!(TombstoneSet::decode(&set.encode()), set);
    }

    #[test]
    fn non_string_array_falls_back_to_legacy_ids() {
        let set = TombstoneSet::decode("[1]");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["[1]"]);

        let set = TombstoneSet::decode("[a], b");
        assert!(set.contains("[a]"));
        assert!(set.contains("b"));
    }
}
