//! Node handle.


use core::time::Duration;

use super::{ControlMode, NodeCore, NodeId, NodeOwner, NodePhase};
use crate::core::{
  error::{FlowError, NodeError},
  futures::Promise,
  timing::TimerKey,
};

/// A unit of work that runs its action whenever all of its pins are unblocked.
///
/// A node fires at most once per readiness episode and never while a previous run is
/// outstanding: pins are only re-armed by the purge step of the run that consumed
/// them. A failing action moves the node to [`NodePhase::Failed`]; the cause is
/// delivered to [`completion`](Self::completion) and to the configured error sink.
#[derive(Clone)]
pub struct AsyncProc {
  owner: NodeOwner,
}

impl AsyncProc {
  pub(super) const fn new(owner: NodeOwner) -> Self {
    Self { owner }
  }

  /// Returns the node id.
  #[must_use]
  pub fn id(&self) -> NodeId {
    self.owner.node_id()
  }

  /// Returns the node name.
  #[must_use]
  pub fn name(&self) -> &str {
    self.owner.core().name()
  }

  /// Returns the owner handle.
  #[must_use]
  pub const fn owner(&self) -> &NodeOwner {
    &self.owner
  }

  /// Returns the control mode.
  #[must_use]
  pub fn control(&self) -> ControlMode {
    self.owner.core().control()
  }

  /// Returns the current phase.
  #[must_use]
  pub fn phase(&self) -> NodePhase {
    self.owner.core().phase()
  }

  /// Returns the number of blocked pins, the control pin included.
  #[must_use]
  pub fn blocked_pins(&self) -> usize {
    self.owner.core().blocked_count()
  }

  /// Returns `true` once the node stopped or failed.
  #[must_use]
  pub fn is_terminated(&self) -> bool {
    self.phase().is_terminal()
  }

  /// Returns the promise completed when the node terminates.
  #[must_use]
  pub fn completion(&self) -> Promise<()> {
    self.owner.core().completion()
  }

  /// Releases the control pin. The node fires as soon as every data pin is ready.
  ///
  /// # Errors
  ///
  /// Returns [`NodeError::AlreadyStarted`] on a second call and
  /// [`NodeError::Terminated`] once the node was stopped.
  pub fn start(&self) -> Result<(), NodeError> {
    NodeCore::start(self.owner.core())?.dispatch();
    Ok(())
  }

  /// Grants another round to a [`ControlMode::PerRun`] node.
  ///
  /// # Errors
  ///
  /// Returns [`NodeError::Terminated`] once the node was stopped.
  pub fn awake(&self) -> Result<(), NodeError> {
    NodeCore::awake(self.owner.core())?.dispatch();
    Ok(())
  }

  /// Grants another round after `delay`.
  ///
  /// # Errors
  ///
  /// Returns [`NodeError::TimerUnavailable`] without a timer, [`NodeError::Terminated`]
  /// once stopped, or the timer's own error.
  pub fn awake_after(&self, delay: Duration) -> Result<TimerKey, NodeError> {
    NodeCore::awake_after(self.owner.core(), delay)
  }

  /// Completes the node normally. A running node finishes its current run first.
  pub fn stop(&self) -> bool {
    NodeCore::request_stop(self.owner.core(), Ok(()))
  }

  /// Fails the node with `cause`. A running node finishes its current run first.
  pub fn stop_with(&self, cause: FlowError) -> bool {
    NodeCore::request_stop(self.owner.core(), Err(cause))
  }
}
