use super::{ActionError, ExecuteError, NodeError, ProtocolViolation};

#[cfg(test)]
mod tests;

/// Cause carried by every terminal failure signal.
///
/// Stream `on_error`, promise failures and node failures all carry a `FlowError`, so a
/// cause can travel from a failed action through promises and streams unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
  /// The outcome was cancelled.
  #[error("cancelled")]
  Cancelled,
  /// A contract was violated.
  #[error("protocol violation: {0}")]
  Protocol(#[from] ProtocolViolation),
  /// A node action failed.
  #[error("action failed: {0}")]
  Action(#[from] ActionError),
  /// A node could not be submitted to its executor.
  #[error("submission failed: {0}")]
  Execute(#[from] ExecuteError),
  /// A node lifecycle operation failed.
  #[error("node error: {0}")]
  Node(#[from] NodeError),
}

impl FlowError {
  /// Returns `true` for [`FlowError::Cancelled`].
  #[must_use]
  pub const fn is_cancellation(&self) -> bool {
    matches!(self, FlowError::Cancelled)
  }

  /// Shorthand for an action failure with `message`.
  #[must_use]
  pub fn action(message: impl Into<alloc::string::String>) -> Self {
    FlowError::Action(ActionError::new(message))
  }
}
