/// Errors reported by a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
  /// The timer has shut down.
  #[error("timer has shut down")]
  ShutDown,
}
