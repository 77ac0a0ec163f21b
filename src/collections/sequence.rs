//! Sequence primitives.
//!
//! Every function here borrows its input slice and, where it produces a
//! sequence, returns a freshly allocated `Vec`. Nothing mutates the caller's
//! data.

use crate::error::{UtilError, UtilResult};
use crate::value::Parity;

/// First element, or `None` for an empty slice.
pub fn first<T>(seq: &[T]) -> Option<&T> {
    seq.first()
}

/// The first `min(n, len)` elements, in order.
pub fn first_n<T: Clone>(seq: &[T], n: usize) -> Vec<T> {
    seq[..n.min(seq.len())].to_vec()
}

/// Last element, or `None` for an empty slice.
pub fn last<T>(seq: &[T]) -> Option<&T> {
    seq.last()
}

/// The last `min(n, len)` elements, in order. `n` past the length yields
/// the whole sequence.
pub fn last_n<T: Clone>(seq: &[T], n: usize) -> Vec<T> {
    seq[seq.len().saturating_sub(n)..].to_vec()
}

/// Call `iterator(value, index, seq)` for every element in order.
pub fn each<T, F>(seq: &[T], mut iterator: F)
where
    F: FnMut(&T, usize, &[T]),
{
    for (index, value) in seq.iter().enumerate() {
        iterator(value, index, seq);
    }
}

/// Index of the first element equal to `target`.
pub fn index_of<T: PartialEq>(seq: &[T], target: &T) -> Option<usize> {
    let mut i = 0;
    while i < seq.len() {
        if seq[i] == *target {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Elements for which `predicate` holds, in original order.
pub fn filter<T, P>(seq: &[T], mut predicate: P) -> Vec<T>
where
    T: Clone,
    P: FnMut(&T) -> bool,
{
    let mut kept = Vec::new();
    for value in seq {
        if predicate(value) {
            kept.push(value.clone());
        }
    }
    kept
}

/// Elements for which `predicate` does not hold, in original order.
pub fn reject<T, P>(seq: &[T], mut predicate: P) -> Vec<T>
where
    T: Clone,
    P: FnMut(&T) -> bool,
{
    filter(seq, |value| !predicate(value))
}

/// First occurrence of each distinct element, in order of first occurrence.
pub fn uniq<T: PartialEq + Clone>(seq: &[T]) -> Vec<T> {
    let mut unique: Vec<T> = Vec::new();
    for value in seq {
        if index_of(&unique, value).is_none() {
            unique.push(value.clone());
        }
    }
    unique
}

/// Apply `transform` to every element.
pub fn map<T, R, F>(seq: &[T], transform: F) -> Vec<R>
where
    F: FnMut(&T) -> R,
{
    seq.iter().map(transform).collect()
}

/// Left fold.
///
/// With `initial = Some(v)` the first application is `iterator(v, &seq[0])`.
/// With `None` the seed is `seq[0]` and folding starts at index 1. Presence is
/// tracked by the `Option`, so a falsy seed such as `0` is honoured.
///
/// # Errors
///
/// [`UtilError::EmptyInput`] when `seq` is empty and no initial value is given.
pub fn reduce<T, F>(seq: &[T], mut iterator: F, initial: Option<T>) -> UtilResult<T>
where
    T: Clone,
    F: FnMut(T, &T) -> T,
{
    let (mut acc, rest) = match initial {
        Some(seed) => (seed, seq),
        None => match seq.split_first() {
            Some((head, tail)) => (head.clone(), tail),
            None => return Err(UtilError::EmptyInput { op: "reduce" }),
        },
    };
    for value in rest {
        acc = iterator(acc, value);
    }
    Ok(acc)
}

/// Left fold into an accumulator of a different type. Total: an empty
/// sequence yields `initial`.
pub fn fold<T, A, F>(seq: &[T], initial: A, iterator: F) -> A
where
    F: FnMut(A, &T) -> A,
{
    seq.iter().fold(initial, iterator)
}

/// Whether some element equals `target`.
pub fn contains<T: PartialEq>(seq: &[T], target: &T) -> bool {
    index_of(seq, target).is_some()
}

/// Whether `predicate` holds for every element. Vacuously true when empty.
pub fn every<T, P>(seq: &[T], predicate: P) -> bool
where
    P: FnMut(&T) -> bool,
{
    seq.iter().all(predicate)
}

/// `every` without a predicate: always true.
pub fn every_default<T>(_seq: &[T]) -> bool {
    true
}

/// Whether `predicate` holds for at least one element. False when empty.
pub fn some<T, P>(seq: &[T], predicate: P) -> bool
where
    P: FnMut(&T) -> bool,
{
    seq.iter().any(predicate)
}

/// `some` with the default predicate "is an even number".
pub fn some_default<T: Parity>(seq: &[T]) -> bool {
    some(seq, |value| value.is_even())
}
