//! Stable merge of adjacent sorted runs.
//!
//! This is the leaf primitive shared by every sorting strategy and by the
//! final cross-segment reduction. Both forms copy the input runs into
//! temporary buffers and interleave them back by repeatedly taking the
//! smaller head, preferring the left run on ties — which is what makes the
//! whole sort stable.
//!
//! Callers must hand in runs that are already individually sorted; that is a
//! precondition, not a checked condition. With unsorted runs the output is
//! still a permutation of the input but carries no ordering guarantee.

/// Merge the two adjacent sorted runs `data[..mid]` and `data[mid..]` into a
/// single sorted run over all of `data`.
///
/// Equal elements from the left run are placed before equal elements from
/// the right run (stable merge).
pub fn merge<T: Ord + Clone>(data: &mut [T], mid: usize) {
    if mid == 0 || mid >= data.len() {
        return;
    }

    let left: Vec<T> = data[..mid].to_vec();
    let right: Vec<T> = data[mid..].to_vec();

    let mut i = 0;
    let mut j = 0;
    for slot in data.iter_mut() {
        let take_left = match (left.get(i), right.get(j)) {
            (Some(l), Some(r)) => l <= r,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if take_left {
            slot.clone_from(&left[i]);
            i += 1;
        } else {
            slot.clone_from(&right[j]);
            j += 1;
        }
    }
}

/// Merge two owned sorted runs into a freshly allocated sorted run.
///
/// This is the owned-buffer form used by pooled MERGE work items, where the
/// runs travel through the task queue rather than living inside the caller's
/// slice. Same stability guarantee as [`merge`]: left wins ties.
#[must_use]
pub fn merge_runs<T: Ord>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l <= r,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        if take_left {
            if let Some(l) = left.next() {
                out.push(l);
            }
        } else if let Some(r) = right.next() {
            out.push(r);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_interleaved() {
        let mut data = vec![1, 3, 5, 2, 4, 6];
        merge(&mut data, 3);
        assert_eq!(data, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_merge_left_tail_remains() {
        let mut data = vec![4, 5, 6, 1, 2];
        merge(&mut data, 3);
        assert_eq!(data, [1, 2, 4, 5, 6]);
    }

    #[test]
    fn test_merge_empty_sides_are_noops() {
        let mut data = vec![2, 1];
        merge(&mut data, 0);
        assert_eq!(data, [2, 1]);
        merge(&mut data, 2);
        assert_eq!(data, [2, 1]);
    }

    #[test]
    fn test_merge_is_stable_left_wins_ties() {
        // Equal keys, distinguishable payloads: left-run elements must come
        // out first.
        let mut data = vec![(9, 'a'), (9, 'c'), (1, 'b'), (9, 'd')];
        // Compare on key only.
        let mut keyed: Vec<Keyed> = data.drain(..).map(|(k, tag)| Keyed { k, tag }).collect();
        merge(&mut keyed, 2);
        let tags: Vec<char> = keyed.iter().map(|e| e.tag).collect();
        assert_eq!(tags, ['b', 'a', 'c', 'd']);
    }

    #[test]
    fn test_merge_runs_basic() {
        let merged = merge_runs(vec![1, 4, 7], vec![2, 3, 9]);
        assert_eq!(merged, [1, 2, 3, 4, 7, 9]);
    }

    #[test]
    fn test_merge_runs_one_side_empty() {
        assert_eq!(merge_runs(Vec::<i32>::new(), vec![1, 2]), [1, 2]);
        assert_eq!(merge_runs(vec![1, 2], Vec::new()), [1, 2]);
    }

    #[derive(Clone, Debug)]
    struct Keyed {
        k: i32,
        tag: char,
    }

    impl PartialEq for Keyed {
        fn eq(&self, other: &Self) -> bool {
            self.k == other.k
        }
    }
    impl Eq for Keyed {}
    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Keyed {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.k.cmp(&other.k)
        }
    }
}
