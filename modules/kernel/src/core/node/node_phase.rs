/// Lifecycle phase of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodePhase {
  /// Pins may still be registered; the control pin holds the node back.
  Created,
  /// Started and waiting for blocked pins.
  Armed,
  /// Submitted to the executor, not yet running.
  Scheduled,
  /// The action is executing.
  Running,
  /// Completed normally.
  Stopped,
  /// Completed with a failure.
  Failed,
}

impl NodePhase {
  /// Returns `true` for [`NodePhase::Stopped`] and [`NodePhase::Failed`].
  #[must_use]
  pub const fn is_terminal(self) -> bool {
    matches!(self, NodePhase::Stopped | NodePhase::Failed)
  }
}
