/// Errors reported by an executor when it cannot accept a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
  /// The executor refused the task, typically because it is saturated.
  #[error("executor rejected the task")]
  RejectedExecution,
  /// The executor has shut down.
  #[error("executor is unavailable")]
  ExecutorUnavailable,
}
