//! Flattening nested sequences.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An element of a nested sequence: a plain item or a further sequence.
///
/// Deserializes from untagged JSON, so `[1, [2, [3]]]` reads as a
/// `Vec<Nested<i32>>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    Item(T),
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    pub fn item(value: T) -> Self {
        Nested::Item(value)
    }

    pub fn list(items: impl IntoIterator<Item = Nested<T>>) -> Self {
        Nested::List(items.into_iter().collect())
    }
}

/// Every item at any depth, in left-to-right order.
pub fn flatten<T: Clone>(nested: &[Nested<T>]) -> Vec<T> {
    let mut flat = Vec::new();
    flatten_into(nested, &mut flat);
    flat
}

fn flatten_into<T: Clone>(nested: &[Nested<T>], out: &mut Vec<T>) {
    for element in nested {
        match element {
            Nested::Item(value) => out.push(value.clone()),
            Nested::List(inner) => flatten_into(inner, out),
        }
    }
}

/// Unwrap one level: lists directly inside `nested` are spliced in, deeper
/// lists stay as they are.
pub fn flatten_shallow<T: Clone>(nested: &[Nested<T>]) -> Vec<Nested<T>> {
    let mut flat = Vec::new();
    for element in nested {
        match element {
            Nested::Item(_) => flat.push(element.clone()),
            Nested::List(inner) => flat.extend(inner.iter().cloned()),
        }
    }
    flat
}

/// Flatten a JSON array, fully or (with `shallow`) one level. A non-array
/// value flattens to itself.
pub fn flatten_json(nested: &Value, shallow: bool) -> Vec<Value> {
    let mut flat = Vec::new();
    match nested {
        Value::Array(items) => flatten_json_into(items, !shallow, &mut flat),
        other => flat.push(other.clone()),
    }
    flat
}

fn flatten_json_into(items: &[Value], deep: bool, out: &mut Vec<Value>) {
    for item in items {
        match item {
            Value::Array(inner) if deep => flatten_json_into(inner, deep, out),
            Value::Array(inner) => out.extend(inner.iter().cloned()),
            other => out.push(other.clone()),
        }
    }
}
