//! Utility module — fork/join worker pool and work splitting helpers.

mod thread_pool;

pub use thread_pool::{ThreadPool, ThreadPoolTask, choose_start_end, split_ranges_mut};
