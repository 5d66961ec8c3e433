use pinflow_utils_rs::core::sync::ArcShared;

use super::NodeCore;

/// Pending submission produced by a pin state change.
///
/// Pins are updated while the caller still holds its own input lock; the submission
/// itself must happen after that lock is released, so it is returned to the caller.
#[must_use = "an activation must be dispatched or the node never runs"]
pub struct Activation {
  node: Option<ArcShared<NodeCore>>,
}

impl Activation {
  /// Returns an activation that submits nothing.
  #[must_use]
  pub const fn none() -> Self {
    Self { node: None }
  }

  pub(crate) const fn of(node: ArcShared<NodeCore>) -> Self {
    Self { node: Some(node) }
  }

  /// Returns `true` when dispatching will submit the node.
  #[must_use]
  pub const fn is_pending(&self) -> bool {
    self.node.is_some()
  }

  /// Submits the node to its executor, if this activation fired it.
  pub fn dispatch(self) {
    if let Some(node) = self.node {
      NodeCore::submit(&node);
    }
  }
}
