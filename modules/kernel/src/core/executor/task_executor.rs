use super::ExecutorTask;
use crate::core::error::ExecuteError;

/// Anything that can run a task later, on some thread.
///
/// The kernel imposes no thread affinity. Node actions are short and never block, so
/// any pool, a tokio runtime or the [`InlineExecutor`](super::InlineExecutor) qualifies.
pub trait TaskExecutor: Send + Sync {
  /// Submits `task` for execution.
  ///
  /// # Errors
  ///
  /// Returns [`ExecuteError`] when the executor refuses the task.
  fn submit(&self, task: ExecutorTask) -> Result<(), ExecuteError>;
}
