//! Route table snapshot.
//!
//! # Responsibilities
//! - Hold the full set of named routes and their path patterns
//! - Preserve insertion order for deterministic resolution results
//! - Provide O(1) lookup by route name
//!
//! # Design Decisions
//! - Immutable once built; a route-set change means building a new table
//! - Duplicate names keep their first definition

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One named route and its path pattern (`/users/{id}` style placeholders).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteEntry {
    pub name: String,
    pub path: String,
}

impl RouteEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Insertion-ordered route table with name lookup.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    by_name: HashMap<String, usize>,
}

impl RouteTable {
    pub fn from_entries(entries: Vec<RouteEntry>) -> Self {
        let mut by_name = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            by_name.entry(entry.name.clone()).or_insert(idx);
        }
        Self { entries, by_name }
    }

    /// Iterate entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&RouteEntry> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    /// Reverse lookup used by the gate: map a matched path pattern back to
    /// its route name.
    pub fn name_for_path(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_order() {
        let table = RouteTable::from_entries(vec![
            RouteEntry::new("b.second", "/b"),
            RouteEntry::new("a.first", "/a"),
        ]);
        assert_eq!(table.get("a.first").unwrap().path, "/a");
        assert!(table.get("missing").is_none());
        let names: Vec<_> = table.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b.second", "a.first"]);
    }

    #[test]
    fn test_duplicate_name_keeps_first() {
        let table = RouteTable::from_entries(vec![
            RouteEntry::new("dup", "/one"),
            RouteEntry::new("dup", "/two"),
        ]);
        assert_eq!(table.get("dup").unwrap().path, "/one");
    }

    #[test]
    fn test_name_for_path() {
        let table = RouteTable::from_entries(vec![RouteEntry::new("user.view", "/users/{id}")]);
        assert_eq!(table.name_for_path("/users/{id}"), Some("user.view"));
        assert_eq!(table.name_for_path("/users/42"), None);
    }
}
