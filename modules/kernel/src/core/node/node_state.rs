use alloc::vec::Vec;

use super::{ControlMode, NodeAction, NodePhase, PinId, PinPurgeShared};
use crate::core::error::FlowError;

/// Mutable part of a node, guarded by the node lock.
///
/// `blocked_count` always equals the number of slots with `blocked == true`.
pub(super) struct NodeState {
  pub(super) phase:         NodePhase,
  pub(super) pins:          Vec<PinSlot>,
  pub(super) blocked_count: usize,
  pub(super) action:        Option<NodeAction>,
  pub(super) stop_request:  Option<Result<(), FlowError>>,
}

pub(super) struct PinSlot {
  blocked: bool,
  purge:   Option<PinPurgeShared>,
}

/// Values released by a terminal transition, dropped outside the lock.
pub(super) struct Sealed {
  pub(super) _action: Option<NodeAction>,
  pub(super) _purges: Vec<PinPurgeShared>,
}

impl NodeState {
  pub(super) fn new() -> Self {
    let mut pins = Vec::with_capacity(4);
    pins.push(PinSlot { blocked: true, purge: None });
    Self { phase: NodePhase::Created, pins, blocked_count: 1, action: None, stop_request: None }
  }

  pub(super) fn add_pin(&mut self, blocked: bool) -> PinId {
    let id = PinId::new(self.pins.len());
    self.pins.push(PinSlot { blocked, purge: None });
    if blocked {
      self.blocked_count += 1;
    }
    id
  }

  pub(super) fn set_purge(&mut self, pin: PinId, purge: PinPurgeShared) {
    if let Some(slot) = self.pins.get_mut(pin.index()) {
      slot.purge = Some(purge);
    }
  }

  pub(super) fn is_blocked(&self, pin: PinId) -> bool {
    self.pins.get(pin.index()).is_some_and(|slot| slot.blocked)
  }

  /// Unblocks `pin`. Returns `true` if its state changed.
  pub(super) fn unblock(&mut self, pin: PinId) -> bool {
    if self.phase.is_terminal() {
      return false;
    }
    match self.pins.get_mut(pin.index()) {
      | Some(slot) if slot.blocked => {
        slot.blocked = false;
        self.blocked_count -= 1;
        true
      },
      | _ => false,
    }
  }

  pub(super) fn block(&mut self, pin: PinId) {
    match self.pins.get_mut(pin.index()) {
      | Some(slot) if !slot.blocked => {
        slot.blocked = true;
        self.blocked_count += 1;
      },
      | _ => {},
    }
  }

  /// Moves an armed, fully unblocked node to `Scheduled`. Returns `true` on transition.
  pub(super) fn try_schedule(&mut self, control: ControlMode) -> bool {
    if self.phase != NodePhase::Armed || self.blocked_count != 0 {
      return false;
    }
    self.phase = NodePhase::Scheduled;
    if control.consumes_token() {
      self.block(PinId::CONTROL);
    }
    true
  }

  pub(super) fn purges(&self) -> Vec<PinPurgeShared> {
    self.pins.iter().filter_map(|slot| slot.purge.clone()).collect()
  }

  /// Enters the terminal phase matching `outcome` and releases the action and inputs.
  pub(super) fn seal(&mut self, outcome: &Result<(), FlowError>) -> Sealed {
    self.phase = if outcome.is_ok() { NodePhase::Stopped } else { NodePhase::Failed };
    self.stop_request = None;
    let purges = self.pins.iter_mut().filter_map(|slot| slot.purge.take()).collect();
    Sealed { _action: self.action.take(), _purges: purges }
  }
}
