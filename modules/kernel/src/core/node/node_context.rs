use core::time::Duration;

use pinflow_utils_rs::core::sync::ArcShared;

use super::{NodeCore, NodeId};
use crate::core::{
  error::{FlowError, NodeError},
  timing::TimerKey,
};

/// Handle given to a running action.
pub struct NodeContext<'a> {
  node: &'a ArcShared<NodeCore>,
}

impl<'a> NodeContext<'a> {
  pub(super) const fn new(node: &'a ArcShared<NodeCore>) -> Self {
    Self { node }
  }

  /// Returns the id of the running node.
  #[must_use]
  pub fn node_id(&self) -> NodeId {
    self.node.id()
  }

  /// Returns the name of the running node.
  #[must_use]
  pub fn name(&self) -> &str {
    self.node.name()
  }

  /// Completes the node normally once this run returns.
  pub fn stop(&mut self) {
    NodeCore::request_stop(self.node, Ok(()));
  }

  /// Fails the node with `cause` once this run returns.
  pub fn fail(&mut self, cause: FlowError) {
    NodeCore::request_stop(self.node, Err(cause));
  }

  /// Allows another round in [`ControlMode::PerRun`](super::ControlMode::PerRun).
  ///
  /// # Errors
  ///
  /// Returns [`NodeError::Terminated`] if the node was stopped meanwhile.
  pub fn awake(&mut self) -> Result<(), NodeError> {
    NodeCore::awake(self.node)?.dispatch();
    Ok(())
  }

  /// Allows another round after `delay`, using the node's timer.
  ///
  /// # Errors
  ///
  /// Returns [`NodeError::TimerUnavailable`] when no timer is configured.
  pub fn awake_after(&mut self, delay: Duration) -> Result<TimerKey, NodeError> {
    NodeCore::awake_after(self.node, delay)
  }
}
