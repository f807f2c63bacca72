#![deny(unsafe_code)]
// Clippy lint configuration:
// - missing_*_doc: error and panic documentation tracked separately
// - uninlined_format_args: mixed style kept for readability in log calls
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

//! # parsort - Parallel Merge Sort Library
//!
//! This library sorts a mutable slice in place with a stable merge sort,
//! using one of three concurrency strategies layered over a shared
//! sequential core:
//!
//! - **Segmented** ([`sort_segmented`]): statically partitions the slice
//!   into `W` nearly equal segments, sorts each on its own worker thread,
//!   then folds the sorted segments together left to right.
//! - **Bounded recursive** ([`sort_bounded`]): classic divide-and-conquer
//!   where each half may be handed to a freshly spawned worker, subject to
//!   a global budget of simultaneously active workers; halves that cannot
//!   acquire budget are sorted synchronously instead.
//! - **Pooled** ([`sort_pooled`]): a fixed set of long-lived workers
//!   consuming sort and merge work items from a shared FIFO queue, with
//!   sentinel-driven shutdown.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │  Dispatcher  │──>│    Strategy      │──>│  Sequential sort │
//! │ (SortConfig) │   │ segment/bounded/ │   │   + stable merge │
//! └──────────────┘   │      pool        │   └──────────────────┘
//!                    └──────────────────┘
//! ```
//!
//! All three strategies produce identical output: a stable, non-descending
//! permutation of the input. They differ only in how work is scheduled and
//! which synchronization primitives coordinate it.
//!
//! # Safety model
//!
//! The crate contains no `unsafe` code. Concurrent workers receive disjoint
//! `&mut` sub-slices via scoped threads, or owned segment buffers via
//! channels; the compiler enforces the disjoint-write invariant that the
//! original pthread formulation of this problem maintains by convention.
//!
//! # Example
//!
//! ```
//! use parsort_lib::{SortConfig, Strategy};
//!
//! let mut data = vec![5, 3, 4, 1, 2];
//! let config = SortConfig::new(Strategy::Segmented, 2);
//! config.sort(&mut data).unwrap();
//! assert_eq!(data, [1, 2, 3, 4, 5]);
//! ```

pub mod bounded;
pub mod errors;
pub mod merge;
pub mod pool;
pub mod segment;
pub mod sequential;
pub mod strategy;

pub use bounded::{sort_bounded, sort_bounded_with, BudgetSlot, WorkerBudget};
pub use errors::{Result, SortError};
pub use merge::{merge, merge_runs};
pub use pool::sort_pooled;
pub use segment::sort_segmented;
pub use sequential::sort_sequential;
pub use strategy::{sort_range, SortConfig, Strategy, DEFAULT_WORKERS};
