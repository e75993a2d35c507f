/// Fixed-size fork/join worker pool.
///
/// Wraps a dedicated `rayon::ThreadPool`. `run_tasks` hands one task to
/// each worker and only returns once every task has finished, so nothing
/// a task writes is observable to the caller before the join.
///
/// # Example
///
/// ```ignore
/// let pool = ThreadPool::new(4)?;
/// let mut data = vec![0u32; 100];
/// let tasks: Vec<_> = split_ranges_mut(&mut data, pool.thread_count())
///     .into_iter()
///     .map(|chunk| move |_thread_id: usize, _thread_count: usize| chunk.fill(1))
///     .collect();
/// pool.run_tasks(tasks);
/// ```

use std::ops::Range;
use crate::error::{Error, Result};
use crate::engine::Engine;

/// One unit of work executed by a single worker.
pub trait ThreadPoolTask: Send {
    /// Run the task. `thread_id` is the task's index in the dispatched batch.
    fn run(self, thread_id: usize, thread_count: usize);
}

impl<F> ThreadPoolTask for F
where
    F: FnOnce(usize, usize) + Send,
{
    fn run(self, thread_id: usize, thread_count: usize) {
        self(thread_id, thread_count)
    }
}

pub struct ThreadPool {
    pool: rayon::ThreadPool,
    thread_count: usize,
}

impl ThreadPool {
    /// Create a pool with `thread_count` workers (0 = available parallelism).
    pub fn new(thread_count: usize) -> Result<Self> {
        let thread_count = if thread_count == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            thread_count
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .thread_name(|i| format!("galaxy3d-worker-{}", i))
            .build()
            .map_err(|e| Engine::log_and_return_error(
                "galaxy3d::ThreadPool",
                Error::InitializationFailed(format!("Failed to build worker pool: {}", e)),
            ))?;

        crate::engine_debug!("galaxy3d::ThreadPool", "Created worker pool with {} threads", thread_count);

        Ok(Self { pool, thread_count })
    }

    /// Create a pool sized to the machine.
    pub fn with_available_parallelism() -> Result<Self> {
        Self::new(0)
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    /// Run every task on the pool and wait for all of them.
    ///
    /// Task `i` receives `thread_id == i` and `thread_count == tasks.len()`.
    pub fn run_tasks<T: ThreadPoolTask>(&self, tasks: Vec<T>) {
        let count = tasks.len();
        self.pool.scope(move |scope| {
            for (thread_id, task) in tasks.into_iter().enumerate() {
                scope.spawn(move |_| task.run(thread_id, count));
            }
        });
    }

    /// Execute `op` inside the pool, so that rayon parallel iterators
    /// started from it use these workers.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}

/// Even chunked split: the slice of `0..element_count` owned by `thread_id`.
///
/// The ranges of all ids in `0..thread_count` tile `0..element_count`
/// in order, without overlap, and differ in size by at most one.
pub fn choose_start_end(thread_id: usize, thread_count: usize, element_count: usize) -> Range<usize> {
    debug_assert!(thread_id < thread_count, "thread id {} out of {}", thread_id, thread_count);
    let start = thread_id * element_count / thread_count;
    let end = (thread_id + 1) * element_count / thread_count;
    start..end
}

/// Split `slice` into `thread_count` disjoint chunks following `choose_start_end`.
///
/// Chunks may be empty when there are fewer elements than threads.
pub fn split_ranges_mut<T>(slice: &mut [T], thread_count: usize) -> Vec<&mut [T]> {
    let total = slice.len();
    let mut chunks = Vec::with_capacity(thread_count);
    let mut rest = slice;
    for thread_id in 0..thread_count {
        let range = choose_start_end(thread_id, thread_count, total);
        let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

#[cfg(test)]
#[path = "thread_pool_tests.rs"]
mod tests;
