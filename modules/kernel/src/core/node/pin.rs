use core::fmt;

use pinflow_utils_rs::core::sync::ArcShared;

use super::{Activation, NodeCore, NodeId, PinId, PinPurgeShared};
use crate::core::error::FlowError;

/// Blocked/unblocked token slot owned by exactly one node.
///
/// Inputs change the pin state while holding their own lock and dispatch the
/// returned [`Activation`] after releasing it.
#[derive(Clone)]
pub struct Pin {
  id:    PinId,
  owner: ArcShared<NodeCore>,
}

impl Pin {
  pub(crate) const fn new(id: PinId, owner: ArcShared<NodeCore>) -> Self {
    Self { id, owner }
  }

  /// Returns the pin index.
  #[must_use]
  pub const fn id(&self) -> PinId {
    self.id
  }

  /// Returns the owning node.
  #[must_use]
  pub fn owner_id(&self) -> NodeId {
    self.owner.id()
  }

  /// Marks the pin unblocked; fires the node when it was the last blocked pin.
  pub fn turn_on(&self) -> Activation {
    NodeCore::turn_on(&self.owner, self.id)
  }

  /// Marks the pin blocked.
  pub fn turn_off(&self) {
    self.owner.turn_off(self.id);
  }

  /// Returns `true` while the pin is blocked.
  #[must_use]
  pub fn is_blocked(&self) -> bool {
    self.owner.is_blocked(self.id)
  }

  /// Returns `true` once the owning node stopped or failed.
  #[must_use]
  pub fn is_owner_terminated(&self) -> bool {
    self.owner.phase().is_terminal()
  }

  /// Installs the hook run on this pin after each successful run.
  pub fn set_purge(&self, purge: PinPurgeShared) {
    self.owner.set_purge(self.id, purge);
  }

  /// Fails the owning node with `cause`, after its current run if it is running.
  pub fn fail_owner(&self, cause: FlowError) -> bool {
    NodeCore::request_stop(&self.owner, Err(cause))
  }
}

impl fmt::Debug for Pin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pin").field("id", &self.id).field("owner", &self.owner.id()).finish()
  }
}
