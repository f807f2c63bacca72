//! Strategy selection and range entry points.
//!
//! Which strategy executes is a configuration choice made when a
//! [`SortConfig`] is built, never a data-dependent decision; the dispatcher
//! does nothing beyond forwarding the call.

use crate::bounded::sort_bounded;
use crate::errors::{Result, SortError};
use crate::pool::sort_pooled;
use crate::segment::sort_segmented;
use crate::sequential::sort_sequential;

/// Default worker count for all parallel strategies.
pub const DEFAULT_WORKERS: usize = 4;

/// The available sorting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Single-threaded merge sort, the baseline all strategies build on.
    Sequential,
    /// Static partition into worker-count segments, then a left-to-right
    /// merge reduction.
    Segmented,
    /// Recursive splitting with a global budget of active workers.
    BoundedRecursive,
    /// Persistent worker pool fed from a FIFO task queue.
    Pooled,
}

/// Configuration for a sort invocation: a strategy and a worker count.
///
/// For [`Strategy::Segmented`] and [`Strategy::Pooled`] the worker count is
/// the number of segments and pool threads; for
/// [`Strategy::BoundedRecursive`] it is the maximum number of
/// simultaneously active threads, initiator included.
#[derive(Debug, Clone, Copy)]
pub struct SortConfig {
    /// Selected strategy.
    pub strategy: Strategy,
    /// Worker count, interpreted per strategy; ignored by
    /// [`Strategy::Sequential`].
    pub workers: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self { strategy: Strategy::Segmented, workers: DEFAULT_WORKERS }
    }
}

impl SortConfig {
    /// Create a configuration from a strategy and worker count.
    #[must_use]
    pub fn new(strategy: Strategy, workers: usize) -> Self {
        Self { strategy, workers }
    }

    /// Sort `data` in place with the configured strategy.
    pub fn sort<T: Ord + Clone + Send>(&self, data: &mut [T]) -> Result<()> {
        match self.strategy {
            Strategy::Sequential => {
                sort_sequential(data);
                Ok(())
            }
            Strategy::Segmented => sort_segmented(data, self.workers),
            Strategy::BoundedRecursive => sort_bounded(data, self.workers),
            Strategy::Pooled => sort_pooled(data, self.workers),
        }
    }
}

/// Sort the inclusive range `[low, high]` of `data` in place; elements
/// outside the range are untouched.
///
/// A range with `low > high` is empty and trivially sorted.
///
/// # Errors
///
/// Returns [`SortError::InvalidRange`] if `high` is out of bounds.
pub fn sort_range<T: Ord + Clone + Send>(
    config: &SortConfig,
    data: &mut [T],
    low: usize,
    high: usize,
) -> Result<()> {
    if low > high {
        return Ok(());
    }
    if high >= data.len() {
        return Err(SortError::InvalidRange { low, high, len: data.len() });
    }
    config.sort(&mut data[low..=high])
}
