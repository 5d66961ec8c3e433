extern crate std;

use alloc::string::String;
use std::thread;

const DEFAULT_NAME_PREFIX: &str = "pinflow-worker";

/// Settings of a [`ThreadPoolExecutor`](super::ThreadPoolExecutor).
#[derive(Clone, Debug)]
pub struct ThreadPoolConfig {
  workers:        usize,
  name_prefix:    String,
  queue_capacity: Option<usize>,
}

impl ThreadPoolConfig {
  /// Sets the number of worker threads. Zero is treated as one.
  #[must_use]
  pub fn with_workers(mut self, workers: usize) -> Self {
    self.workers = workers.max(1);
    self
  }

  /// Sets the prefix of worker thread names.
  #[must_use]
  pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.name_prefix = prefix.into();
    self
  }

  /// Bounds the task queue. Submissions beyond it are rejected.
  #[must_use]
  pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
    self.queue_capacity = Some(capacity.max(1));
    self
  }

  /// Returns the number of worker threads.
  #[must_use]
  pub const fn workers(&self) -> usize {
    self.workers
  }

  /// Returns the worker thread name prefix.
  #[must_use]
  pub fn name_prefix(&self) -> &str {
    &self.name_prefix
  }

  /// Returns the task queue bound, `None` when unbounded.
  #[must_use]
  pub const fn queue_capacity(&self) -> Option<usize> {
    self.queue_capacity
  }
}

impl Default for ThreadPoolConfig {
  fn default() -> Self {
    let workers = thread::available_parallelism().map_or(1, usize::from);
    Self { workers, name_prefix: String::from(DEFAULT_NAME_PREFIX), queue_capacity: None }
  }
}
