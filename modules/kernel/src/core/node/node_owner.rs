use pinflow_utils_rs::core::sync::ArcShared;

use super::{NodeCore, NodeId, Pin};
use crate::core::{error::NodeError, executor::ExecutorShared};

/// Explicit owner handle used by inputs to register their pins.
#[derive(Clone)]
pub struct NodeOwner {
  core: ArcShared<NodeCore>,
}

impl NodeOwner {
  pub(crate) const fn new(core: ArcShared<NodeCore>) -> Self {
    Self { core }
  }

  pub(crate) const fn core(&self) -> &ArcShared<NodeCore> {
    &self.core
  }

  /// Returns the node id.
  #[must_use]
  pub fn node_id(&self) -> NodeId {
    self.core.id()
  }

  /// Returns the executor the node runs on.
  #[must_use]
  pub fn executor(&self) -> &ExecutorShared {
    self.core.executor()
  }

  /// Registers a new pin.
  ///
  /// # Errors
  ///
  /// Returns [`NodeError::AlreadyStarted`] once the node was started and
  /// [`NodeError::Terminated`] if it was stopped before starting.
  pub fn register_pin(&self, blocked: bool) -> Result<Pin, NodeError> {
    let id = self.core.register_pin(blocked)?;
    Ok(Pin::new(id, self.core.clone()))
  }
}
