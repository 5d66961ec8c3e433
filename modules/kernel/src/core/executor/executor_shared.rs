use alloc::boxed::Box;
use core::fmt;

use pinflow_utils_rs::core::sync::ArcShared;

use super::{ExecutorTask, TaskExecutor};
use crate::core::error::ExecuteError;

/// Cloneable handle to a [`TaskExecutor`].
#[derive(Clone)]
pub struct ExecutorShared {
  inner: ArcShared<dyn TaskExecutor>,
}

impl ExecutorShared {
  /// Wraps an executor.
  #[must_use]
  pub fn new<E>(executor: E) -> Self
  where
    E: TaskExecutor + 'static, {
    let inner = ArcShared::new(executor).into_dyn(|executor| executor as &dyn TaskExecutor);
    Self { inner }
  }

  /// Wraps an already shared executor.
  #[must_use]
  pub const fn from_shared(inner: ArcShared<dyn TaskExecutor>) -> Self {
    Self { inner }
  }

  /// Submits a boxed task.
  ///
  /// # Errors
  ///
  /// Returns [`ExecuteError`] when the executor refuses the task.
  pub fn submit(&self, task: ExecutorTask) -> Result<(), ExecuteError> {
    self.inner.submit(task)
  }

  /// Boxes and submits a closure.
  ///
  /// # Errors
  ///
  /// Returns [`ExecuteError`] when the executor refuses the task.
  pub fn execute<F>(&self, task: F) -> Result<(), ExecuteError>
  where
    F: FnOnce() + Send + 'static, {
    self.inner.submit(Box::new(task))
  }
}

impl fmt::Debug for ExecutorShared {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ExecutorShared").finish_non_exhaustive()
  }
}
