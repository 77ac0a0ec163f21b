//! Keyed collections: iteration, value search and merging.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::value::NoValue;

/// A keyed collection with unique keys.
///
/// Enumeration order is the container's own: insertion order for
/// `serde_json::Map`, key order for `BTreeMap`, unspecified for `HashMap`.
pub trait Mapping {
    type Key;
    type Value;

    fn entries(&self) -> Box<dyn Iterator<Item = (&Self::Key, &Self::Value)> + '_>;

    fn get_value(&self, key: &Self::Key) -> Option<&Self::Value>;

    fn set_value(&mut self, key: Self::Key, value: Self::Value);

    fn has_key(&self, key: &Self::Key) -> bool {
        self.get_value(key).is_some()
    }
}

impl<K, V, S> Mapping for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }

    fn get_value(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn set_value(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K: Ord, V> Mapping for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.iter())
    }

    fn get_value(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn set_value(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl Mapping for Map<String, Value> {
    type Key = String;
    type Value = Value;

    fn entries(&self) -> Box<dyn Iterator<Item = (&String, &Value)> + '_> {
        Box::new(self.iter())
    }

    fn get_value(&self, key: &String) -> Option<&Value> {
        self.get(key)
    }

    fn set_value(&mut self, key: String, value: Value) {
        self.insert(key, value);
    }
}

/// Call `iterator(value, key, mapping)` for every entry in enumeration order.
pub fn each_entry<M, F>(mapping: &M, mut iterator: F)
where
    M: Mapping,
    F: FnMut(&M::Value, &M::Key, &M),
{
    for (key, value) in mapping.entries() {
        iterator(value, key, mapping);
    }
}

/// Whether some value of `mapping` equals `target`.
pub fn contains_value<M>(mapping: &M, target: &M::Value) -> bool
where
    M: Mapping,
    M::Value: PartialEq,
{
    mapping.entries().any(|(_, value)| value == target)
}

/// Copy every entry of each source into `target`, left to right. Later
/// sources overwrite earlier ones and the target's own entries.
///
/// `target` is mutated in place and returned; clone it first to keep the
/// original.
pub fn extend<'t, 's, M, S, I>(target: &'t mut M, sources: I) -> &'t mut M
where
    M: Mapping,
    M::Key: Clone,
    M::Value: Clone,
    S: Mapping<Key = M::Key, Value = M::Value> + 's,
    I: IntoIterator<Item = &'s S>,
{
    for source in sources {
        for (key, value) in source.entries() {
            target.set_value(key.clone(), value.clone());
        }
    }
    target
}

/// Like [`extend`], but a key is only written while the target has it unset
/// (missing, or holding "no value"). The first source providing a key wins.
pub fn defaults<'t, 's, M, S, I>(target: &'t mut M, sources: I) -> &'t mut M
where
    M: Mapping,
    M::Key: Clone,
    M::Value: Clone + NoValue,
    S: Mapping<Key = M::Key, Value = M::Value> + 's,
    I: IntoIterator<Item = &'s S>,
{
    for source in sources {
        for (key, value) in source.entries() {
            let unset = target
                .get_value(key)
                .map_or(true, |existing| existing.is_no_value());
            if unset {
                target.set_value(key.clone(), value.clone());
            }
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_each_entry_visits_in_insertion_order() {
        let record = object(json!({"b": 1, "a": 2, "c": 3}));
        let mut seen = Vec::new();
        each_entry(&record, |value, key, map| {
            assert_eq!(map.len(), 3);
            seen.push((key.clone(), value.clone()));
        });
        assert_eq!(
            seen,
            vec![
                ("b".to_string(), json!(1)),
                ("a".to_string(), json!(2)),
                ("c".to_string(), json!(3)),
            ]
        );
    }

    #[test]
    fn test_contains_value() {
        let mut scores = HashMap::new();
        scores.insert("alice", 3);
        scores.insert("bob", 5);
        assert!(contains_value(&scores, &5));
        assert!(!contains_value(&scores, &4));
    }

    #[test]
    fn test_extend_later_sources_win() {
        let mut target = object(json!({"a": 1}));
        let first = object(json!({"a": 2, "b": 3}));
        let second = object(json!({"b": 4}));
        extend(&mut target, [&first, &second]);
        assert_eq!(Value::Object(target), json!({"a": 2, "b": 4}));
    }

    #[test]
    fn test_extend_across_map_kinds() {
        let mut target: HashMap<&str, i32> = HashMap::new();
        target.insert("x", 1);
        let mut source = BTreeMap::new();
        source.insert("y", 2);
        extend(&mut target, [&source]);
        assert_eq!(target.get("y"), Some(&2));
        assert_eq!(target.get("x"), Some(&1));
    }

    #[test]
    fn test_defaults_keeps_existing() {
        let mut target = object(json!({"a": 1}));
        let source = object(json!({"a": 2, "b": 3}));
        defaults(&mut target, [&source]);
        assert_eq!(Value::Object(target), json!({"a": 1, "b": 3}));
    }

    #[test]
    fn test_defaults_first_source_wins() {
        let mut target = object(json!({}));
        let first = object(json!({"b": 1}));
        let second = object(json!({"b": 2, "c": 3}));
        defaults(&mut target, [&first, &second]);
        assert_eq!(Value::Object(target), json!({"b": 1, "c": 3}));
    }

    #[test]
    fn test_defaults_fills_no_value() {
        let mut target = object(json!({"a": null}));
        let source = object(json!({"a": 9}));
        defaults(&mut target, [&source]);
        assert_eq!(target.get("a"), Some(&json!(9)));

        let mut options: BTreeMap<&str, Option<u32>> = BTreeMap::new();
        options.insert("retries", None);
        let mut fallback = BTreeMap::new();
        fallback.insert("retries", Some(3));
        defaults(&mut options, [&fallback]);
        assert_eq!(options.get("retries"), Some(&Some(3)));
    }
}
