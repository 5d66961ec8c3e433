//! Executor running tasks on the submitting thread.

use alloc::collections::VecDeque;

use pinflow_utils_rs::core::{concurrent::DrainGate, sync::SpinSyncMutex};

use super::{ExecutorTask, TaskExecutor};
use crate::core::error::ExecuteError;

#[cfg(test)]
mod tests;

/// Runs tasks synchronously on the caller's thread.
///
/// Submissions made while a task is running (for example a node firing another node
/// from inside its action) are queued and run by the outer caller once the current
/// task returns, so chains of nodes never grow the stack. This makes a whole network
/// deterministic in single-threaded tests.
pub struct InlineExecutor {
  queue: SpinSyncMutex<VecDeque<ExecutorTask>>,
  gate:  DrainGate,
}

impl InlineExecutor {
  /// Creates an inline executor.
  #[must_use]
  pub const fn new() -> Self {
    Self { queue: SpinSyncMutex::new(VecDeque::new()), gate: DrainGate::new() }
  }

  /// Returns the number of queued tasks not yet started.
  #[must_use]
  pub fn pending(&self) -> usize {
    self.queue.lock().len()
  }

  fn run_queued(&self) {
    loop {
      let task = self.queue.lock().pop_front();
      let Some(task) = task else {
        break;
      };
      task();
    }
  }
}

impl Default for InlineExecutor {
  fn default() -> Self {
    Self::new()
  }
}

impl TaskExecutor for InlineExecutor {
  fn submit(&self, task: ExecutorTask) -> Result<(), ExecuteError> {
    self.queue.lock().push_back(task);
    self.gate.drain_with(|| self.run_queued(), || !self.queue.lock().is_empty());
    Ok(())
  }
}
