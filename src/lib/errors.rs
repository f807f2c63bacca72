//! Error types for sort operations.

use thiserror::Error;

/// Result type alias for sort operations.
pub type Result<T> = std::result::Result<T, SortError>;

/// Error type for sort operations.
///
/// Worker-creation failures are fatal for the call that hit them: once a
/// strategy has committed to a parallel partition of the range there is no
/// partial-result fallback. Budget exhaustion in the bounded strategy is
/// *not* an error; it degrades to sequential execution in the same call.
#[derive(Error, Debug)]
pub enum SortError {
    /// The operating system refused to create a worker thread.
    #[error("failed to spawn {role} thread: {source}")]
    Spawn {
        /// Role of the thread that could not be created
        role: &'static str,
        /// Underlying OS error
        source: std::io::Error,
    },

    /// A worker thread panicked while holding part of the range.
    #[error("{role} thread panicked during sort")]
    WorkerPanicked {
        /// Role of the thread that panicked
        role: &'static str,
    },

    /// The task queue disconnected while the pool was still expected to run.
    #[error("task queue disconnected before pool shutdown")]
    QueueDisconnected,

    /// An inclusive sort range does not fit the slice.
    #[error("invalid sort range [{low}, {high}] for slice of length {len}")]
    InvalidRange {
        /// Inclusive lower bound
        low: usize,
        /// Inclusive upper bound
        high: usize,
        /// Length of the slice
        len: usize,
    },
}
