extern crate std;

#[cfg(test)]
mod tests;

use tokio::runtime::Handle;

use crate::core::{
  error::ExecuteError,
  executor::{ExecutorTask, TaskExecutor},
};

/// [`TaskExecutor`] that spawns tasks on a Tokio runtime.
pub struct TokioExecutor {
  handle: Handle,
}

impl TokioExecutor {
  /// Creates an executor using the provided runtime handle.
  #[must_use]
  pub const fn new(handle: Handle) -> Self {
    Self { handle }
  }

  /// Creates an executor on the runtime of the calling context.
  ///
  /// # Errors
  ///
  /// Returns [`ExecuteError::ExecutorUnavailable`] outside a Tokio runtime.
  pub fn current() -> Result<Self, ExecuteError> {
    Handle::try_current().map(Self::new).map_err(|_| ExecuteError::ExecutorUnavailable)
  }

  /// Returns the runtime handle.
  #[must_use]
  pub const fn handle(&self) -> &Handle {
    &self.handle
  }
}

impl TaskExecutor for TokioExecutor {
  fn submit(&self, task: ExecutorTask) -> Result<(), ExecuteError> {
    drop(self.handle.spawn(async move { task() }));
    Ok(())
  }
}
