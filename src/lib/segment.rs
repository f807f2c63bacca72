//! Segment strategy: static partitioning with one worker per segment.
//!
//! The range is split up front into `W` nearly equal contiguous segments.
//! Each segment is sorted on its own scoped worker thread; once every worker
//! has been joined, the sorted segments are folded together sequentially,
//! strictly left to right, on the calling thread. The left-to-right order is
//! what keeps the reduction operating on adjacent runs, which the stable
//! merge primitive requires.
//!
//! Worker creation failure is fatal for the call: the partition was computed
//! assuming full parallel coverage and there is no partial-result fallback.

use std::thread;

use crate::errors::{Result, SortError};
use crate::merge::merge;
use crate::sequential::sort_sequential;

/// Partition `len` elements into at most `workers` nearly equal segment
/// lengths whose sum is exactly `len`.
///
/// Segment size is `ceil(len / workers)`; the final segment absorbs the
/// remainder and may be shorter. When `len < workers` every segment
/// degenerates to length 1 and fewer than `workers` segments are produced.
#[must_use]
pub(crate) fn segment_lengths(len: usize, workers: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let size = len.div_ceil(workers.max(1));
    let mut lengths = Vec::with_capacity(len.div_ceil(size));
    let mut remaining = len;
    while remaining > 0 {
        let take = size.min(remaining);
        lengths.push(take);
        remaining -= take;
    }
    lengths
}

/// Fold adjacent sorted segments into one sorted run, left to right.
///
/// `lengths` must partition `data` exactly, and each segment must already be
/// sorted. After `lengths.len() - 1` merges the whole slice is one run.
pub(crate) fn merge_reduce<T: Ord + Clone>(data: &mut [T], lengths: &[usize]) {
    let Some(&first) = lengths.first() else {
        return;
    };
    let mut merged = first;
    for &len in &lengths[1..] {
        merge(&mut data[..merged + len], merged);
        merged += len;
    }
}

/// Sort `data` in place by partitioning it into `workers` segments, sorting
/// each segment on its own thread, then merging the segments left to right.
///
/// # Errors
///
/// Returns [`SortError::Spawn`] if a worker thread cannot be created and
/// [`SortError::WorkerPanicked`] if one panics; in both cases every worker
/// that did start is joined before the error is returned, so no thread
/// outlives the call.
pub fn sort_segmented<T: Ord + Clone + Send>(data: &mut [T], workers: usize) -> Result<()> {
    if data.len() <= 1 {
        return Ok(());
    }

    let lengths = segment_lengths(data.len(), workers);
    let size = lengths[0];
    log::debug!(
        "segment sort: {} elements in {} segments of <= {}",
        data.len(),
        lengths.len(),
        size
    );

    thread::scope(|scope| -> Result<()> {
        let mut handles = Vec::with_capacity(lengths.len());
        for (index, chunk) in data.chunks_mut(size).enumerate() {
            let builder = thread::Builder::new().name(format!("segment-sort-{index}"));
            let handle = builder
                .spawn_scoped(scope, move || sort_sequential(chunk))
                .map_err(|source| SortError::Spawn { role: "segment-sort", source })?;
            handles.push(handle);
        }

        // Join-before-merge: the reduction must not start while any worker
        // still owns a segment.
        for handle in handles {
            handle.join().map_err(|_| SortError::WorkerPanicked { role: "segment-sort" })?;
        }
        Ok(())
    })?;

    merge_reduce(data, &lengths);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_lengths_last_absorbs_remainder() {
        assert_eq!(segment_lengths(5, 2), [3, 2]);
        assert_eq!(segment_lengths(1000, 4), [250, 250, 250, 250]);
        assert_eq!(segment_lengths(10, 3), [4, 4, 2]);
    }

    #[test]
    fn test_segment_lengths_degenerate() {
        assert_eq!(segment_lengths(0, 4), Vec::<usize>::new());
        assert_eq!(segment_lengths(3, 8), [1, 1, 1]);
        assert_eq!(segment_lengths(4, 4), [1, 1, 1, 1]);
        assert_eq!(segment_lengths(6, 0), [6]);
    }

    #[test]
    fn test_merge_reduce_three_segments() {
        let mut data = vec![4, 9, 1, 6, 2, 3];
        data[..2].sort_unstable();
        data[2..4].sort_unstable();
        data[4..].sort_unstable();
        merge_reduce(&mut data, &[2, 2, 2]);
        assert_eq!(data, [1, 2, 3, 4, 6, 9]);
    }

    #[test]
    fn test_sort_segmented_example() {
        // Two workers split [5,3,4,1,2] into [5,3,4] and [1,2].
        let mut data = vec![5, 3, 4, 1, 2];
        sort_segmented(&mut data, 2).unwrap();
        assert_eq!(data, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sort_segmented_trivial_lengths() {
        let mut empty: Vec<i32> = vec![];
        sort_segmented(&mut empty, 4).unwrap();
        assert!(empty.is_empty());

        let mut single = vec![3];
        sort_segmented(&mut single, 4).unwrap();
        assert_eq!(single, [3]);
    }

    #[test]
    fn test_sort_segmented_more_workers_than_elements() {
        let mut data = vec![3, 1, 2];
        sort_segmented(&mut data, 16).unwrap();
        assert_eq!(data, [1, 2, 3]);
    }
}
