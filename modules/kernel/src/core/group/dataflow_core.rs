use alloc::{string::String, vec::Vec};

use ahash::RandomState;
use hashbrown::HashMap;
use pinflow_utils_rs::core::sync::{ArcShared, SpinSyncMutex};

use crate::core::{
  error::FlowError,
  executor::ExecutorShared,
  futures::Promise,
  node::{ErrorSinkShared, NodeCore, NodeDefaults, NodeId},
  timing::TimerShared,
};

/// Shared state of a dataflow group.
pub(crate) struct DataflowCore {
  name:       String,
  executor:   Option<ExecutorShared>,
  timer:      Option<TimerShared>,
  error_sink: Option<ErrorSinkShared>,
  completion: Promise<()>,
  state:      SpinSyncMutex<GroupState>,
}

struct GroupState {
  members:  HashMap<NodeId, ArcShared<NodeCore>, RandomState>,
  live:     usize,
  finished: bool,
}

impl DataflowCore {
  pub(crate) fn new(
    name: String,
    executor: Option<ExecutorShared>,
    timer: Option<TimerShared>,
    error_sink: Option<ErrorSinkShared>,
  ) -> Self {
    let completion = match &executor {
      | Some(executor) => Promise::with_executor(executor.clone()),
      | None => Promise::new(),
    };
    let state = GroupState { members: HashMap::with_hasher(RandomState::new()), live: 0, finished: false };
    Self { name, executor, timer, error_sink, completion, state: SpinSyncMutex::new(state) }
  }

  pub(crate) fn name(&self) -> &str {
    &self.name
  }

  pub(crate) fn completion(&self) -> Promise<()> {
    self.completion.clone()
  }

  pub(crate) fn defaults(this: &ArcShared<Self>) -> NodeDefaults {
    NodeDefaults {
      executor:   this.executor.clone(),
      timer:      this.timer.clone(),
      error_sink: this.error_sink.clone(),
      group:      Some(this.clone()),
    }
  }

  pub(crate) fn member_count(&self) -> usize {
    self.state.lock().members.len()
  }

  pub(crate) fn add_member(&self, node: &ArcShared<NodeCore>) {
    let finished = {
      let mut state = self.state.lock();
      if !state.finished {
        state.members.insert(node.id(), node.clone());
        if !node.is_daemon() {
          state.live += 1;
        }
      }
      state.finished
    };
    if finished {
      NodeCore::request_stop(node, Ok(()));
    }
  }

  /// Called by a member after it reached a terminal phase.
  ///
  /// The first failure fails the group and stops the other members; the exit of the
  /// last non-daemon member completes the group and stops the daemons.
  pub(crate) fn member_terminated(&self, id: NodeId, outcome: &Result<(), FlowError>) {
    let (finish, to_stop) = {
      let mut state = self.state.lock();
      let Some(node) = state.members.remove(&id) else {
        return;
      };
      if !node.is_daemon() {
        state.live -= 1;
      }
      let finish = match outcome {
        | Err(cause) if !state.finished => Some(Err(cause.clone())),
        | Ok(()) if !state.finished && !node.is_daemon() && state.live == 0 => Some(Ok(())),
        | _ => None,
      };
      if finish.is_none() {
        return;
      }
      state.finished = true;
      let to_stop: Vec<ArcShared<NodeCore>> = state.members.values().cloned().collect();
      (finish, to_stop)
    };
    if let Some(outcome) = finish {
      self.completion.complete_with(outcome);
    }
    for node in to_stop {
      NodeCore::request_stop(&node, Ok(()));
    }
  }

  /// Stops every member. An empty group completes at once.
  pub(crate) fn stop(&self) {
    let (members, empty) = {
      let state = self.state.lock();
      (state.members.values().cloned().collect::<Vec<_>>(), state.live == 0)
    };
    if empty {
      {
        self.state.lock().finished = true;
      }
      self.completion.complete(());
    }
    for node in members {
      NodeCore::request_stop(&node, Ok(()));
    }
  }
}
