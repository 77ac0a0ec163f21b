//! Set-like operations under element equality.

use crate::collections::{contains, uniq};

/// Distinct elements of the first input present in every other input, in
/// the order first encountered in the first input. No inputs yields nothing.
pub fn intersection<T: PartialEq + Clone>(seqs: &[&[T]]) -> Vec<T> {
    let Some((head, rest)) = seqs.split_first() else {
        return Vec::new();
    };
    uniq(head)
        .into_iter()
        .filter(|value| rest.iter().all(|other| contains(other, value)))
        .collect()
}

/// Elements of `seq`, in order, that equal no element of any of `others`.
/// Duplicates within `seq` are kept.
pub fn difference<T: PartialEq + Clone>(seq: &[T], others: &[&[T]]) -> Vec<T> {
    seq.iter()
        .filter(|value| !others.iter().any(|other| contains(other, value)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection() {
        let stooges = ["moe", "curly", "larry"];
        let leaders = ["moe", "groucho"];
        assert_eq!(intersection(&[&stooges[..], &leaders[..]]), vec!["moe"]);
    }

    #[test]
    fn test_intersection_dedups_and_keeps_first_order() {
        let a = [3, 1, 3, 2, 1];
        let b = [1, 2, 3];
        let c = [2, 3, 9];
        assert_eq!(intersection(&[&a[..], &b[..], &c[..]]), vec![3, 2]);
        assert_eq!(intersection(&[&a[..]]), vec![3, 1, 2]);
        assert!(intersection::<i32>(&[]).is_empty());
    }

    #[test]
    fn test_difference_leaves_input_alone() {
        let numbers = vec![1, 2, 3, 4];
        assert_eq!(difference(&numbers, &[&[2, 4][..]]), vec![1, 3]);
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_difference_many_inputs() {
        let numbers = [1, 2, 3, 4, 5, 1];
        assert_eq!(
            difference(&numbers, &[&[5, 2, 10][..], &[3][..]]),
            vec![1, 4, 1]
        );
        assert_eq!(difference(&numbers, &[]), numbers.to_vec());
    }
}
