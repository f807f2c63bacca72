//! Sequential merge sort over a slice.
//!
//! This is the leaf algorithm of every parallel strategy: segment workers
//! run it over their segment, the bounded recursive strategy falls back to
//! it when the worker budget is exhausted, and pool workers run it for SORT
//! work items. It is deterministic and touches no shared state.

use crate::merge::merge;

/// Sort `data` in place with a recursive, stable merge sort.
///
/// A slice of length 0 or 1 is trivially sorted and returned untouched.
pub fn sort_sequential<T: Ord + Clone>(data: &mut [T]) {
    if data.len() <= 1 {
        return;
    }
    let mid = data.len().div_ceil(2);
    let (left, right) = data.split_at_mut(mid);
    sort_sequential(left);
    sort_sequential(right);
    merge(data, mid);
}
