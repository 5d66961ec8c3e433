//! Group of nodes sharing defaults and a joint completion.


use alloc::string::String;

use pinflow_utils_rs::core::sync::ArcShared;

use super::{DataflowConfig, DataflowCore};
use crate::core::{
  futures::Promise,
  node::{AsyncProcBuilder, NodeConfig},
};

/// A set of nodes whose completion is observed as one.
///
/// Members inherit the group's executor, timer and error sink unless their own
/// [`NodeConfig`] overrides them. The group completes once every non-daemon member
/// stopped, and fails with the first member failure, which also stops the rest.
#[derive(Clone)]
pub struct Dataflow {
  core: ArcShared<DataflowCore>,
}

impl Dataflow {
  /// Creates an empty group.
  #[must_use]
  pub fn new(config: DataflowConfig) -> Self {
    let name = config.name().map_or_else(|| String::from("dataflow"), String::from);
    let core = DataflowCore::new(name, config.executor().cloned(), config.timer().cloned(), config.error_sink().cloned());
    Self { core: ArcShared::new(core) }
  }

  /// Returns the group name.
  #[must_use]
  pub fn name(&self) -> &str {
    self.core.name()
  }

  /// Starts building a member node. It joins the group when built.
  #[must_use]
  pub fn node_builder(&self, config: NodeConfig) -> AsyncProcBuilder {
    AsyncProcBuilder::with_defaults(config, DataflowCore::defaults(&self.core))
  }

  /// Returns the number of members that have not terminated.
  #[must_use]
  pub fn node_count(&self) -> usize {
    self.core.member_count()
  }

  /// Returns the group completion.
  #[must_use]
  pub fn completion(&self) -> Promise<()> {
    self.core.completion()
  }

  /// Stops every member.
  pub fn stop(&self) {
    self.core.stop();
  }
}

impl Default for Dataflow {
  fn default() -> Self {
    Self::new(DataflowConfig::default())
  }
}
