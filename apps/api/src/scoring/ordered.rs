//! Insertion-ordered string-keyed map used for skill and job mappings.
//!
//! AI responses are JSON objects whose key order is meaningful (missing skills
//! are reported in requirement order, dashboard rows in job order), so the
//! deserializer keeps document order. Re-inserting an existing key keeps its
//! position and replaces the value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedMap<V> {
    entries: IndexMap<String, V>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Inserts `value` under `key`. An existing key keeps its slot (last write wins).
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_keeps_document_order() {
        let map: OrderedMap<i32> = serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_key_keeps_first_slot_and_last_value() {
        let map: OrderedMap<i32> = serde_json::from_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&3));
        assert_eq!(map.keys().next(), Some("a"));
    }

    #[test]
    fn test_serialize_round_trips_order() {
        let map: OrderedMap<i32> = [("b", 1), ("a", 2)].into_iter().collect();
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"b":1,"a":2}"#);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(serde_json::from_str::<OrderedMap<i32>>("[1, 2]").is_err());
    }

    #[test]
    fn test_large_object_deserializes_with_hashed_lookup() {
        let body = format!(
            "{{{}}}",
            (0..100_000)
                .map(|i| format!("\"s{i}\": {}", i % 4))
                .collect::<Vec<_>>()
                .join(",")
        );
        let started = std::time::Instant::now();
        let map: OrderedMap<i32> = serde_json::from_str(&body).unwrap();
        assert_eq!(map.len(), 100_000);
        assert_eq!(map.get("s99999"), Some(&3));
        assert_eq!(map.keys().last(), Some("s99999"));
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }
}
