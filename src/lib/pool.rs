//! Worker-pool strategy: long-lived workers driven by an explicit task queue.
//!
//! A fixed set of workers is started up front; each repeatedly blocks on a
//! shared FIFO queue, executes the work item it dequeued, reports the result,
//! and goes back to waiting. The initiator enqueues one SORT item per
//! segment, blocks until the outstanding-work counter drains to zero, folds
//! the sorted segments together itself, then delivers exactly one shutdown
//! sentinel per worker and joins them all.
//!
//! # Pool lifecycle
//!
//! ```text
//! starting ──> running ──> draining ──> stopped
//!  workers      SORT/MERGE   one sentinel   all workers
//!  created      items flow   per worker     joined
//! ```
//!
//! The queue is a `crossbeam-channel` unbounded channel: FIFO, blocking
//! `recv` with no busy-polling, and each item is delivered to exactly one
//! worker. Work items own their segment buffers, so the caller's slice is
//! touched only by the initiator — when it copies segments out into SORT
//! items, copies sorted runs back, and runs the merge reduction.
//!
//! MERGE items exist and workers execute them, but the default sort path
//! performs the reduction on the initiating thread and schedules none.

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Condvar, Mutex};
use std::thread;

use crate::errors::{Result, SortError};
use crate::merge::merge_runs;
use crate::segment::{merge_reduce, segment_lengths};
use crate::sequential::sort_sequential;

/// A unit of deferred work consumed by pool workers.
///
/// Created by a producer, appended to the queue tail, consumed exactly once
/// by some worker, then discarded.
pub enum Task<T> {
    /// Sort one segment's worth of elements.
    Sort {
        /// Index of the segment within the partition.
        segment: usize,
        /// The segment's elements, owned by the item while queued.
        run: Vec<T>,
    },
    /// Merge two adjacent sorted runs into one.
    Merge {
        /// Index identifying the merged result.
        segment: usize,
        /// Left sorted run; wins ties in the stable merge.
        left: Vec<T>,
        /// Right sorted run.
        right: Vec<T>,
    },
    /// Sentinel whose sole effect is to terminate the consuming worker's
    /// loop. The initiator enqueues exactly one per worker during draining.
    Shutdown,
}

/// Completed work reported back to the initiator.
#[derive(Debug, PartialEq, Eq)]
pub enum TaskOutput<T> {
    /// Result of a [`Task::Sort`].
    Sorted {
        /// Segment index the run belongs to.
        segment: usize,
        /// The sorted elements.
        run: Vec<T>,
    },
    /// Result of a [`Task::Merge`].
    Merged {
        /// Segment index identifying the merge.
        segment: usize,
        /// The merged sorted elements.
        run: Vec<T>,
    },
}

impl<T> TaskOutput<T> {
    /// Segment index and payload, regardless of the item kind.
    #[must_use]
    pub fn into_parts(self) -> (usize, Vec<T>) {
        match self {
            TaskOutput::Sorted { segment, run } | TaskOutput::Merged { segment, run } => {
                (segment, run)
            }
        }
    }
}

/// Count of work items dequeued but not yet completed, plus items still
/// queued.
///
/// Incremented by the producer at enqueue time and decremented by the worker
/// that completed the item; when the count drains to zero the condition
/// variable wakes anyone blocked in [`wait_until_idle`](Self::wait_until_idle).
/// All mutation happens inside the counter's own critical section.
#[derive(Default)]
pub struct OutstandingWork {
    count: Mutex<usize>,
    idle: Condvar,
}

impl OutstandingWork {
    /// Record `n` newly enqueued work items.
    pub fn add(&self, n: usize) {
        *self.count.lock() += n;
    }

    /// Record one completed work item, waking waiters if it was the last.
    pub fn complete(&self) {
        let mut count = self.count.lock();
        debug_assert!(*count > 0, "complete without matching add");
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.idle.notify_all();
        }
    }

    /// Block until every recorded work item has completed.
    pub fn wait_until_idle(&self) {
        let mut count = self.count.lock();
        while *count > 0 {
            self.idle.wait(&mut count);
        }
    }

    /// Current number of incomplete work items.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        *self.count.lock()
    }
}

/// The consume loop run by each pool worker.
///
/// Blocks on the queue, executes SORT items with the sequential sort and
/// MERGE items with the stable merge, reports each result before decrementing
/// the outstanding-work counter, and exits on a [`Task::Shutdown`] sentinel
/// or when the queue disconnects. Disconnection is the abort path: an
/// initiator bailing out early drops the sender so that parked workers can
/// still be joined.
pub fn worker_loop<T: Ord + Clone>(
    tasks: &Receiver<Task<T>>,
    outputs: &Sender<TaskOutput<T>>,
    outstanding: &OutstandingWork,
) {
    loop {
        let task = match tasks.recv() {
            Ok(task) => task,
            Err(_) => break,
        };
        match task {
            Task::Shutdown => break,
            Task::Sort { segment, mut run } => {
                sort_sequential(&mut run);
                let _ = outputs.send(TaskOutput::Sorted { segment, run });
                outstanding.complete();
            }
            Task::Merge { segment, left, right } => {
                let run = merge_runs(left, right);
                let _ = outputs.send(TaskOutput::Merged { segment, run });
                outstanding.complete();
            }
        }
    }
}

/// Sort `data` in place using a pool of `workers` long-lived worker threads
/// fed from a shared FIFO task queue.
///
/// The initiator partitions the slice exactly as the segment strategy does,
/// enqueues one SORT item per segment, waits for the outstanding-work
/// counter to drain, copies the sorted runs back, performs the left-to-right
/// merge reduction itself, then drains the pool with one sentinel per worker
/// and joins every worker before returning.
pub fn sort_pooled<T: Ord + Clone + Send>(data: &mut [T], workers: usize) -> Result<()> {
    if data.len() <= 1 {
        return Ok(());
    }
    let workers = workers.max(1);
    let lengths = segment_lengths(data.len(), workers);
    let offsets: Vec<usize> = lengths
        .iter()
        .scan(0, |acc, &len| {
            let start = *acc;
            *acc += len;
            Some(start)
        })
        .collect();

    let (task_tx, task_rx) = unbounded::<Task<T>>();
    let (out_tx, out_rx) = unbounded::<TaskOutput<T>>();
    let outstanding = OutstandingWork::default();

    thread::scope(|scope| -> Result<()> {
        // The scope owns the sender: every early return drops it, so workers
        // already parked in recv() observe disconnection, exit their loops,
        // and can be joined instead of blocking the scope forever.
        let task_tx = task_tx;

        // Starting: all workers begin parked on the empty queue.
        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let task_rx = task_rx.clone();
            let out_tx = out_tx.clone();
            let outstanding = &outstanding;
            let builder = thread::Builder::new().name(format!("pool-worker-{id}"));
            let handle = builder
                .spawn_scoped(scope, move || worker_loop(&task_rx, &out_tx, outstanding))
                .map_err(|source| SortError::Spawn { role: "pool-worker", source })?;
            handles.push(handle);
        }
        log::debug!("pool: {} workers started for {} segments", workers, lengths.len());

        // Running: one SORT item per segment. Each enqueue counts the item
        // as outstanding before it hits the queue, so the counter can never
        // be observed at zero while work remains.
        for (segment, (&start, &len)) in offsets.iter().zip(&lengths).enumerate() {
            let run = data[start..start + len].to_vec();
            outstanding.add(1);
            task_tx
                .send(Task::Sort { segment, run })
                .map_err(|_| SortError::QueueDisconnected)?;
        }

        // Block (no polling) until the last SORT item completes.
        outstanding.wait_until_idle();

        // Every result is buffered by now; each worker reports before it
        // decrements the counter. Copy the sorted runs back into their
        // disjoint segments of the array.
        for _ in 0..lengths.len() {
            let (segment, run) =
                out_rx.recv().map_err(|_| SortError::QueueDisconnected)?.into_parts();
            let start = offsets[segment];
            data[start..start + run.len()].clone_from_slice(&run);
        }

        // The reduction runs on the initiator while the pool sits idle; the
        // array is exclusively the initiator's during every merge step.
        merge_reduce(data, &lengths);

        // Draining: exactly one sentinel per worker. First-come-first-served
        // delivery is enough since sentinel count equals worker count.
        log::debug!("pool: draining {} workers", workers);
        for _ in 0..workers {
            task_tx.send(Task::Shutdown).map_err(|_| SortError::QueueDisconnected)?;
        }
        for handle in handles {
            handle.join().map_err(|_| SortError::WorkerPanicked { role: "pool-worker" })?;
        }
        Ok(())
    })
}
