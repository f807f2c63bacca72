//! Bounded recursive strategy: divide-and-conquer with a global worker budget.
//!
//! Each recursion level splits its range at the midpoint and tries to hand
//! each half to a freshly spawned worker. Whether a worker may be spawned is
//! decided by a shared [`WorkerBudget`]: a lock-guarded counter of
//! simultaneously active workers that never exceeds a configured maximum.
//! A half that cannot acquire budget is sorted synchronously with the
//! sequential sort — that is the intended throttling behavior, not an error.
//!
//! Spawned halves are joined before the two halves are merged, so the merge
//! always operates on a range no other thread can touch.

use std::thread;

use parking_lot::Mutex;

use crate::errors::{Result, SortError};
use crate::merge::merge;
use crate::sequential::sort_sequential;

/// Shared budget of simultaneously active workers.
///
/// The count starts at 1, covering the thread that initiates the sort, and
/// is mutated only inside the budget's own critical section: the
/// read-check-increment of [`try_acquire`](Self::try_acquire) is atomic, and
/// the decrement runs under the same lock when the returned [`BudgetSlot`]
/// is dropped. Tying the decrement to `Drop` keeps the count exact on every
/// path — a worker finishing its half, and equally an initiator unwinding
/// with an error while still holding a slot. The high-water mark is tracked
/// so tests can verify the budget invariant under stress.
pub struct WorkerBudget {
    state: Mutex<BudgetState>,
    max: usize,
}

struct BudgetState {
    active: usize,
    peak: usize,
}

/// One acquired worker slot; returns itself to the budget on drop.
pub struct BudgetSlot<'a> {
    budget: &'a WorkerBudget,
}

impl Drop for BudgetSlot<'_> {
    fn drop(&mut self) {
        let mut state = self.budget.state.lock();
        debug_assert!(state.active > 0, "slot outlived its budget count");
        state.active = state.active.saturating_sub(1);
    }
}

impl WorkerBudget {
    /// Create a budget allowing at most `max_workers` simultaneously active
    /// threads, the initiator included.
    #[must_use]
    pub fn new(max_workers: usize) -> Self {
        Self { state: Mutex::new(BudgetState { active: 1, peak: 1 }), max: max_workers.max(1) }
    }

    /// Atomically claim one worker slot.
    ///
    /// Returns a slot (incrementing the active count) while the count is
    /// below the maximum; returns `None` (and changes nothing) otherwise.
    pub fn try_acquire(&self) -> Option<BudgetSlot<'_>> {
        let mut state = self.state.lock();
        if state.active < self.max {
            state.active += 1;
            state.peak = state.peak.max(state.active);
            Some(BudgetSlot { budget: self })
        } else {
            None
        }
    }

    /// Current number of active threads counted against the budget.
    #[must_use]
    pub fn active(&self) -> usize {
        self.state.lock().active
    }

    /// Highest active count ever observed.
    #[must_use]
    pub fn peak(&self) -> usize {
        self.state.lock().peak
    }

    /// The configured maximum.
    #[must_use]
    pub fn max_workers(&self) -> usize {
        self.max
    }
}

/// Sort `data` in place, recursively splitting the range and spawning a
/// worker per half while the budget of `max_workers` simultaneously active
/// threads allows it.
pub fn sort_bounded<T: Ord + Clone + Send>(data: &mut [T], max_workers: usize) -> Result<()> {
    let budget = WorkerBudget::new(max_workers);
    sort_bounded_with(data, &budget)
}

/// [`sort_bounded`] against a caller-supplied budget.
///
/// Sharing the budget lets callers observe [`WorkerBudget::peak`] after the
/// sort, or throttle several concurrent sorts against one global limit.
pub fn sort_bounded_with<T: Ord + Clone + Send>(
    data: &mut [T],
    budget: &WorkerBudget,
) -> Result<()> {
    bounded_recurse(data, budget)
}

fn bounded_recurse<T: Ord + Clone + Send>(data: &mut [T], budget: &WorkerBudget) -> Result<()> {
    if data.len() <= 1 {
        return Ok(());
    }
    let mid = data.len().div_ceil(2);
    let (left, right) = data.split_at_mut(mid);

    // One atomic check-and-increment per half. A half that gets no slot is
    // sorted inline on this thread. Each slot travels into its worker's
    // closure and is dropped when that half is done; a slot still held here
    // when an error unwinds the call is dropped with it.
    let left_slot = budget.try_acquire();
    let right_slot = budget.try_acquire();

    thread::scope(|scope| -> Result<()> {
        let (left_handle, left_inline) = if let Some(slot) = left_slot {
            let builder = thread::Builder::new().name("bounded-sort".to_string());
            let handle = builder
                .spawn_scoped(scope, move || {
                    let result = bounded_recurse(left, budget);
                    drop(slot);
                    result
                })
                .map_err(|source| SortError::Spawn { role: "bounded-sort", source })?;
            (Some(handle), None)
        } else {
            (None, Some(left))
        };

        let (right_handle, right_inline) = if let Some(slot) = right_slot {
            let builder = thread::Builder::new().name("bounded-sort".to_string());
            let handle = builder
                .spawn_scoped(scope, move || {
                    let result = bounded_recurse(right, budget);
                    drop(slot);
                    result
                })
                .map_err(|source| SortError::Spawn { role: "bounded-sort", source })?;
            (Some(handle), None)
        } else {
            (None, Some(right))
        };

        if let Some(chunk) = left_inline {
            sort_sequential(chunk);
        }
        if let Some(chunk) = right_inline {
            sort_sequential(chunk);
        }

        if let Some(handle) = left_handle {
            handle.join().map_err(|_| SortError::WorkerPanicked { role: "bounded-sort" })??;
        }
        if let Some(handle) = right_handle {
            handle.join().map_err(|_| SortError::WorkerPanicked { role: "bounded-sort" })??;
        }
        Ok(())
    })?;

    // Both halves are sorted and no worker owns any part of the range.
    merge(data, mid);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_acquire_and_drop() {
        let budget = WorkerBudget::new(3);
        assert_eq!(budget.active(), 1);
        let first = budget.try_acquire().expect("slot available");
        let second = budget.try_acquire().expect("slot available");
        // Full: initiator + 2 spawned.
        assert!(budget.try_acquire().is_none());
        drop(first);
        let third = budget.try_acquire().expect("slot freed by drop");
        assert_eq!(budget.peak(), 3);
        drop(second);
        drop(third);
        assert_eq!(budget.active(), 1);
    }

    #[test]
    fn test_budget_of_one_never_grants() {
        let budget = WorkerBudget::new(1);
        assert!(budget.try_acquire().is_none());
        assert_eq!(budget.peak(), 1);
    }

    #[test]
    fn test_slots_release_when_worker_closure_never_runs() {
        // Thread creation can fail after both halves acquired slots. The
        // failed half's closure is discarded unrun and the initiator unwinds
        // still holding the other slot; both must return to the budget.
        let budget = WorkerBudget::new(4);
        let left = budget.try_acquire().expect("slot available");
        let right = budget.try_acquire().expect("slot available");
        assert_eq!(budget.active(), 3);

        let worker = move || drop(left);
        drop(worker);
        drop(right);
        assert_eq!(budget.active(), 1);

        // The budget is intact for later sorts sharing it.
        let mut data = vec![3, 1, 2];
        sort_bounded_with(&mut data, &budget).unwrap();
        assert_eq!(data, [1, 2, 3]);
        assert_eq!(budget.active(), 1);
    }

    #[test]
    fn test_sort_bounded_reverse_input() {
        let mut data: Vec<i32> = (0..500).rev().collect();
        sort_bounded(&mut data, 4).unwrap();
        let expected: Vec<i32> = (0..500).collect();
        assert_eq!(data, expected);
    }

    #[test]
    fn test_sort_bounded_budget_of_one_is_sequential() {
        let budget = WorkerBudget::new(1);
        let mut data = vec![4, 2, 5, 1, 3];
        sort_bounded_with(&mut data, &budget).unwrap();
        assert_eq!(data, [1, 2, 3, 4, 5]);
        assert_eq!(budget.peak(), 1);
    }

    #[test]
    fn test_sort_bounded_peak_within_budget() {
        let budget = WorkerBudget::new(4);
        let mut data: Vec<i32> = (0..2048).rev().collect();
        sort_bounded_with(&mut data, &budget).unwrap();
        assert!(budget.peak() <= 4, "peak {} exceeded budget", budget.peak());
        // All spawned workers released their slots.
        assert_eq!(budget.active(), 1);
    }

    #[test]
    fn test_sort_bounded_trivial_lengths() {
        let mut empty: Vec<i32> = vec![];
        sort_bounded(&mut empty, 4).unwrap();
        assert!(empty.is_empty());

        let mut single = vec![9];
        sort_bounded(&mut single, 4).unwrap();
        assert_eq!(single, [9]);
    }
}
