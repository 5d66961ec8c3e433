//! Firing state machine shared by every node handle.

use alloc::{format, string::String};
use core::time::Duration;

use pinflow_utils_rs::core::sync::{ArcShared, SpinSyncMutex};

use super::{
  Activation, ControlMode, ErrorSinkShared, NodeAction, NodeConfig, NodeContext, NodeDefaults, NodeId, NodePhase,
  PinId, PinPurgeShared,
  node_state::{NodeState, Sealed},
};
use crate::core::{
  error::{FlowError, NodeError},
  executor::{ExecutorShared, InlineExecutor},
  futures::Promise,
  group::DataflowCore,
  timing::{TimerKey, TimerShared},
};

/// Node internals.
///
/// The node lock is a leaf: it is taken while an input holds its own lock, and
/// nothing is called out while it is held. Executor submission, promise completion,
/// error sink reports and group notifications all happen after it is released.
pub(crate) struct NodeCore {
  id:         NodeId,
  name:       String,
  control:    ControlMode,
  daemon:     bool,
  executor:   ExecutorShared,
  timer:      Option<TimerShared>,
  error_sink: Option<ErrorSinkShared>,
  group:      Option<ArcShared<DataflowCore>>,
  completion: Promise<()>,
  state:      SpinSyncMutex<NodeState>,
}

impl NodeCore {
  pub(crate) fn new(config: NodeConfig, defaults: NodeDefaults) -> ArcShared<Self> {
    let id = NodeId::next();
    let name = config.name().map_or_else(|| format!("{id}"), String::from);
    let executor =
      config.executor().cloned().or(defaults.executor).unwrap_or_else(|| ExecutorShared::new(InlineExecutor::new()));
    let timer = config.timer().cloned().or(defaults.timer);
    let error_sink = config.error_sink().cloned().or(defaults.error_sink);
    ArcShared::new(Self {
      id,
      name,
      control: config.control(),
      daemon: config.is_daemon(),
      completion: Promise::with_executor(executor.clone()),
      executor,
      timer,
      error_sink,
      group: defaults.group,
      state: SpinSyncMutex::new(NodeState::new()),
    })
  }

  pub(crate) const fn id(&self) -> NodeId {
    self.id
  }

  pub(crate) fn name(&self) -> &str {
    &self.name
  }

  pub(crate) const fn control(&self) -> ControlMode {
    self.control
  }

  pub(crate) const fn is_daemon(&self) -> bool {
    self.daemon
  }

  pub(crate) const fn executor(&self) -> &ExecutorShared {
    &self.executor
  }

  pub(crate) const fn group(&self) -> Option<&ArcShared<DataflowCore>> {
    self.group.as_ref()
  }

  pub(crate) fn completion(&self) -> Promise<()> {
    self.completion.clone()
  }

  pub(crate) fn phase(&self) -> NodePhase {
    self.state.lock().phase
  }

  pub(crate) fn blocked_count(&self) -> usize {
    self.state.lock().blocked_count
  }

  pub(crate) fn install_action(&self, action: NodeAction) {
    let mut state = self.state.lock();
    if state.phase == NodePhase::Created {
      state.action = Some(action);
    }
  }

  pub(crate) fn register_pin(&self, blocked: bool) -> Result<PinId, NodeError> {
    let mut state = self.state.lock();
    match state.phase {
      | NodePhase::Created => Ok(state.add_pin(blocked)),
      | phase if phase.is_terminal() => Err(NodeError::Terminated),
      | _ => Err(NodeError::AlreadyStarted),
    }
  }

  pub(crate) fn set_purge(&self, pin: PinId, purge: PinPurgeShared) {
    self.state.lock().set_purge(pin, purge);
  }

  pub(crate) fn is_blocked(&self, pin: PinId) -> bool {
    self.state.lock().is_blocked(pin)
  }

  /// Unblocks `pin`; fires the node if it was the last blocked pin of an armed node.
  pub(crate) fn turn_on(this: &ArcShared<Self>, pin: PinId) -> Activation {
    let mut state = this.state.lock();
    if state.unblock(pin) && state.try_schedule(this.control) {
      return Activation::of(this.clone());
    }
    Activation::none()
  }

  pub(crate) fn turn_off(&self, pin: PinId) {
    self.state.lock().block(pin);
  }

  pub(crate) fn start(this: &ArcShared<Self>) -> Result<Activation, NodeError> {
    let mut state = this.state.lock();
    match state.phase {
      | NodePhase::Created => {
        state.phase = NodePhase::Armed;
        state.unblock(PinId::CONTROL);
        if state.try_schedule(this.control) {
          return Ok(Activation::of(this.clone()));
        }
        Ok(Activation::none())
      },
      | phase if phase.is_terminal() => Err(NodeError::Terminated),
      | _ => Err(NodeError::AlreadyStarted),
    }
  }

  /// Unblocks the control pin of a started node. A node not yet started is left alone.
  pub(crate) fn awake(this: &ArcShared<Self>) -> Result<Activation, NodeError> {
    {
      let state = this.state.lock();
      if state.phase.is_terminal() {
        return Err(NodeError::Terminated);
      }
      if state.phase == NodePhase::Created {
        return Ok(Activation::none());
      }
    }
    Ok(Self::turn_on(this, PinId::CONTROL))
  }

  pub(crate) fn awake_after(this: &ArcShared<Self>, delay: Duration) -> Result<TimerKey, NodeError> {
    let timer = this.timer.as_ref().ok_or(NodeError::TimerUnavailable)?;
    if this.phase().is_terminal() {
      return Err(NodeError::Terminated);
    }
    let node = this.clone();
    let key = timer.schedule(delay, move || {
      if let Ok(activation) = NodeCore::awake(&node) {
        activation.dispatch();
      }
    })?;
    Ok(key)
  }

  /// Stops the node with `outcome`.
  ///
  /// A running node finishes its current run first. Returns `false` if the node was
  /// already terminal or a stop was already requested.
  pub(crate) fn request_stop(this: &ArcShared<Self>, outcome: Result<(), FlowError>) -> bool {
    let sealed = {
      let mut state = this.state.lock();
      match state.phase {
        | phase if phase.is_terminal() => return false,
        | NodePhase::Running => {
          if state.stop_request.is_some() {
            return false;
          }
          state.stop_request = Some(outcome);
          return true;
        },
        | _ => state.seal(&outcome),
      }
    };
    this.after_termination(sealed, outcome);
    true
  }

  pub(crate) fn submit(this: &ArcShared<Self>) {
    let node = this.clone();
    if let Err(error) = this.executor.execute(move || NodeCore::run(&node)) {
      let sealed = {
        let mut state = this.state.lock();
        if state.phase != NodePhase::Scheduled {
          return;
        }
        state.seal(&Err(FlowError::Execute(error)))
      };
      this.after_termination(sealed, Err(FlowError::Execute(error)));
    }
  }

  fn run(this: &ArcShared<Self>) {
    let (mut action, purges) = {
      let mut state = this.state.lock();
      if state.phase != NodePhase::Scheduled {
        return;
      }
      let Some(action) = state.action.take() else {
        return;
      };
      state.phase = NodePhase::Running;
      (action, state.purges())
    };

    let mut context = NodeContext::new(this);
    if let Err(error) = action(&mut context) {
      let outcome = Err(FlowError::Action(error));
      let sealed = this.state.lock().seal(&outcome);
      drop(action);
      this.after_termination(sealed, outcome);
      return;
    }

    for purge in &purges {
      purge.purge();
    }
    drop(purges);

    let mut state = this.state.lock();
    let outcome = match state.stop_request.take() {
      | Some(outcome) => outcome,
      | None if this.control == ControlMode::Once => Ok(()),
      | None => {
        state.action = Some(action);
        state.phase = NodePhase::Armed;
        let rescheduled = state.try_schedule(this.control);
        drop(state);
        if rescheduled {
          Self::submit(this);
        }
        return;
      },
    };
    let sealed = state.seal(&outcome);
    drop(state);
    drop(action);
    this.after_termination(sealed, outcome);
  }

  fn after_termination(&self, sealed: Sealed, outcome: Result<(), FlowError>) {
    drop(sealed);
    if let (Err(cause), Some(sink)) = (&outcome, &self.error_sink) {
      sink.node_failed(self.id, &self.name, cause);
    }
    self.completion.complete_with(outcome.clone());
    if let Some(group) = &self.group {
      group.member_terminated(self.id, &outcome);
    }
  }
}
