use super::{ExecuteError, TimerError};

/// Errors returned by node lifecycle operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
  /// The node was already started; pins can no longer be registered.
  #[error("cannot register or start after the node was started")]
  AlreadyStarted,
  /// The node has stopped or failed.
  #[error("node is terminated")]
  Terminated,
  /// `awake_after` was called on a node without a timer.
  #[error("no timer configured")]
  TimerUnavailable,
  /// The executor refused the submission.
  #[error(transparent)]
  Execute(#[from] ExecuteError),
  /// The timer refused the schedule.
  #[error(transparent)]
  Timer(#[from] TimerError),
}
