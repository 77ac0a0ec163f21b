//! Stable sorting by a derived key.

use crate::collections::Record;
use crate::value::{NoValue, SortKey};

/// `seq` ordered ascending by `criterion(element)`.
///
/// The sort is stable. Elements whose key is "no value" (`None`, JSON `null`)
/// go to the end, keeping their relative order.
pub fn sort_by<T, K, F>(seq: &[T], mut criterion: F) -> Vec<T>
where
    T: Clone,
    K: SortKey,
    F: FnMut(&T) -> K,
{
    let keys: Vec<K> = seq.iter().map(&mut criterion).collect();
    order_by_keys(seq, &keys, |k| k.is_no_value(), |a, b| a.cmp_key(b))
}

/// `seq` ordered ascending by the value of the property `name`. Records
/// lacking the property sort last, as if their key had no value.
pub fn sort_by_property<R>(seq: &[R], name: &str) -> Vec<R>
where
    R: Record + Clone,
    R::Value: SortKey,
{
    let keys: Vec<Option<&R::Value>> = seq
        .iter()
        .map(|record| record.property(name))
        .collect();
    order_by_keys(
        seq,
        &keys,
        |key| key.map_or(true, |value| value.is_no_value()),
        |a, b| match (a, b) {
            (Some(a), Some(b)) => a.cmp_key(b),
            _ => std::cmp::Ordering::Equal,
        },
    )
}

fn order_by_keys<T, K, N, C>(seq: &[T], keys: &[K], is_missing: N, compare: C) -> Vec<T>
where
    T: Clone,
    N: Fn(&K) -> bool,
    C: Fn(&K, &K) -> std::cmp::Ordering,
{
    let (mut present, missing): (Vec<usize>, Vec<usize>) =
        (0..seq.len()).partition(|&i| !is_missing(&keys[i]));
    // slice::sort_by is stable
    present.sort_by(|&a, &b| compare(&keys[a], &keys[b]));
    present
        .into_iter()
        .chain(missing)
        .map(|i| seq[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_by_function() {
        let words = ["banana", "kiwi", "apple", "fig"];
        assert_eq!(
            sort_by(&words, |w| w.len()),
            vec!["fig", "kiwi", "apple", "banana"]
        );
    }

    #[test]
    fn test_sort_by_is_stable() {
        let items = vec![
            json!({"k": 1, "id": "a"}),
            json!({"k": 0, "id": "z"}),
            json!({"k": 1, "id": "b"}),
        ];
        let ids: Vec<_> = sort_by_property(&items, "k")
            .into_iter()
            .map(|item| item["id"].clone())
            .collect();
        assert_eq!(ids, vec![json!("z"), json!("a"), json!("b")]);
    }

    #[test]
    fn test_sort_by_property_name() {
        let people = vec![
            json!({"name": "curly", "age": 50}),
            json!({"name": "moe", "age": 30}),
        ];
        let sorted = sort_by_property(&people, "name");
        assert_eq!(sorted[0]["name"], json!("curly"));
        let sorted = sort_by_property(&people, "age");
        assert_eq!(sorted[0]["name"], json!("moe"));
    }

    #[test]
    fn test_no_value_keys_sort_last() {
        let values = [Some(3), None, Some(1), None, Some(2)];
        let sorted = sort_by(&values, |v| *v);
        assert_eq!(sorted, vec![Some(1), Some(2), Some(3), None, None]);

        let records = vec![
            json!({"id": 1}),
            json!({"id": 2, "rank": 5}),
            json!({"id": 3, "rank": null}),
            json!({"id": 4, "rank": 1}),
        ];
        let ids: Vec<_> = sort_by_property(&records, "rank")
            .into_iter()
            .map(|r| r["id"].clone())
            .collect();
        assert_eq!(ids, vec![json!(4), json!(2), json!(1), json!(3)]);
    }

    #[test]
    fn test_sort_by_leaves_input_alone() {
        let numbers = vec![3, 1, 2];
        assert_eq!(sort_by(&numbers, |n| *n), vec![1, 2, 3]);
        assert_eq!(numbers, vec![3, 1, 2]);
    }
}
