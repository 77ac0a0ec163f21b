//! Records with named properties, and `pluck`.

use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Anything whose fields can be looked up by name.
pub trait Record {
    type Value;

    fn property(&self, name: &str) -> Option<&Self::Value>;
}

/// Only JSON objects have properties; every other JSON value yields `None`.
impl Record for Value {
    type Value = Value;

    fn property(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|object| object.get(name))
    }
}

impl Record for Map<String, Value> {
    type Value = Value;

    fn property(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<V, S: BuildHasher> Record for HashMap<String, V, S> {
    type Value = V;

    fn property(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<V> Record for BTreeMap<String, V> {
    type Value = V;

    fn property(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<R: Record + ?Sized> Record for &R {
    type Value = R::Value;

    fn property(&self, name: &str) -> Option<&R::Value> {
        (**self).property(name)
    }
}

/// The value of `property_name` from each record; `None` where it is absent.
pub fn pluck<R>(records: &[R], property_name: &str) -> Vec<Option<R::Value>>
where
    R: Record,
    R::Value: Clone,
{
    records
        .iter()
        .map(|record| record.property(property_name).cloned())
        .collect()
}
