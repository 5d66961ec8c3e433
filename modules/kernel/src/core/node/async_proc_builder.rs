use alloc::boxed::Box;

use super::{AsyncProc, NodeConfig, NodeContext, NodeCore, NodeDefaults, NodeOwner};
use crate::core::error::ActionError;

/// Two-step node construction: register inputs on [`owner`](Self::owner), then
/// [`build`](Self::build) with the action.
pub struct AsyncProcBuilder {
  owner: NodeOwner,
}

impl AsyncProcBuilder {
  /// Creates a builder for a standalone node.
  #[must_use]
  pub fn new(config: NodeConfig) -> Self {
    Self::with_defaults(config, NodeDefaults::default())
  }

  pub(crate) fn with_defaults(config: NodeConfig, defaults: NodeDefaults) -> Self {
    Self { owner: NodeOwner::new(NodeCore::new(config, defaults)) }
  }

  /// Returns the owner handle used to register pins.
  #[must_use]
  pub const fn owner(&self) -> &NodeOwner {
    &self.owner
  }

  /// Installs `action` and returns the node, not yet started.
  #[must_use]
  pub fn build<F>(self, action: F) -> AsyncProc
  where
    F: FnMut(&mut NodeContext<'_>) -> Result<(), ActionError> + Send + 'static, {
    let core = self.owner.core().clone();
    core.install_action(Box::new(action));
    if let Some(group) = core.group() {
      group.add_member(&core);
    }
    AsyncProc::new(self.owner)
  }
}
