extern crate std;

use alloc::string::String;
use std::thread;

use crate::core::{
  error::ExecuteError,
  executor::{ExecutorTask, TaskExecutor},
};

/// Executor that runs every task on a newly spawned OS thread.
pub struct ThreadedExecutor {
  name: Option<String>,
}

impl ThreadedExecutor {
  /// Creates an executor that spawns anonymous threads.
  #[must_use]
  pub const fn new() -> Self {
    Self { name: None }
  }

  /// Assigns a thread name to future spawns.
  #[must_use]
  pub fn with_name(name: impl Into<String>) -> Self {
    Self { name: Some(name.into()) }
  }
}

impl Default for ThreadedExecutor {
  fn default() -> Self {
    Self::new()
  }
}

impl TaskExecutor for ThreadedExecutor {
  fn submit(&self, task: ExecutorTask) -> Result<(), ExecuteError> {
    let mut builder = thread::Builder::new();
    if let Some(name) = &self.name {
      builder = builder.name(name.clone());
    }

    builder.spawn(task).map(|_| ()).map_err(|_| ExecuteError::RejectedExecution)
  }
}
