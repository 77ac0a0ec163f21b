//! Zipping sequences of uneven length.

/// Tuple `i` holds element `i` of every input, `None` where an input is
/// already exhausted. The output is as long as the longest input.
pub fn zip<T: Clone>(seqs: &[&[T]]) -> Vec<Vec<Option<T>>> {
    let longest = seqs.iter().map(|seq| seq.len()).max().unwrap_or(0);
    (0..longest)
        .map(|i| seqs.iter().map(|seq| seq.get(i).cloned()).collect())
        .collect()
}

/// Two-sequence [`zip`] keeping each side's own element type.
pub fn zip2<A: Clone, B: Clone>(left: &[A], right: &[B]) -> Vec<(Option<A>, Option<B>)> {
    let longest = left.len().max(right.len());
    (0..longest)
        .map(|i| (left.get(i).cloned(), right.get(i).cloned()))
        .collect()
}
