//! One-shot multicast result.


use alloc::{boxed::Box, vec::Vec};
use core::{mem, sync::atomic::Ordering, task::Waker};

use pinflow_utils_rs::core::sync::{ArcShared, SpinSyncMutex};
use portable_atomic::AtomicUsize;

use super::{
  PromiseListener,
  promise_state::{PromiseState, PromiseWaiter, WaiterKey},
};
use crate::core::{
  error::{ActionError, FlowError},
  executor::ExecutorShared,
  input::ScalarInput,
  node::{AsyncProcBuilder, ControlMode, NodeConfig},
  protocol::{ScalarPublisher, ScalarSubscriber, ScalarSubscriberShared},
};

/// Holder of an eventual value or failure, observable by any number of parties.
///
/// The first of [`complete`](Self::complete), [`complete_exceptionally`](Self::complete_exceptionally)
/// or [`cancel`](Self::cancel) wins; later calls return `false` and change nothing.
/// Subscribing after completion delivers the fixed outcome immediately.
///
/// Waiters are notified outside the lock. The first waiter runs on the completing
/// thread; when the promise has an executor the others are handed to it, so one
/// completion never runs an unbounded number of callbacks inline.
pub struct Promise<T> {
  inner: ArcShared<PromiseInner<T>>,
}

struct PromiseInner<T> {
  state:    SpinSyncMutex<PromiseState<T>>,
  executor: Option<ExecutorShared>,
  next_key: AtomicUsize,
}

impl<T> Promise<T>
where
  T: Clone + Send + 'static,
{
  /// Creates a pending promise that notifies every waiter inline.
  #[must_use]
  pub fn new() -> Self {
    Self::with_executor_option(None)
  }

  /// Creates a pending promise that dispatches secondary waiters through `executor`.
  #[must_use]
  pub fn with_executor(executor: ExecutorShared) -> Self {
    Self::with_executor_option(Some(executor))
  }

  /// Creates a promise already completed with `value`.
  #[must_use]
  pub fn completed(value: T) -> Self {
    let promise = Self::new();
    promise.complete(value);
    promise
  }

  /// Creates a promise already failed with `cause`.
  #[must_use]
  pub fn failed(cause: FlowError) -> Self {
    let promise = Self::new();
    promise.complete_exceptionally(cause);
    promise
  }

  fn with_executor_option(executor: Option<ExecutorShared>) -> Self {
    let inner = PromiseInner {
      state: SpinSyncMutex::new(PromiseState::Pending(Vec::new())),
      executor,
      next_key: AtomicUsize::new(0),
    };
    Self { inner: ArcShared::new(inner) }
  }

  /// Returns the executor used for secondary waiters, if any.
  #[must_use]
  pub fn executor(&self) -> Option<&ExecutorShared> {
    self.inner.executor.as_ref()
  }

  /// Completes with `value`. Returns `false` if the outcome was already fixed.
  pub fn complete(&self, value: T) -> bool {
    self.complete_with(Ok(value))
  }

  /// Completes with `cause`. Returns `false` if the outcome was already fixed.
  pub fn complete_exceptionally(&self, cause: FlowError) -> bool {
    self.complete_with(Err(cause))
  }

  /// Fails with [`FlowError::Cancelled`]. Running work is not interrupted.
  pub fn cancel(&self) -> bool {
    self.complete_exceptionally(FlowError::Cancelled)
  }

  /// Completes with `outcome`. Returns `false` if the outcome was already fixed.
  pub fn complete_with(&self, outcome: Result<T, FlowError>) -> bool {
    let waiters = {
      let mut state = self.inner.state.lock();
      match &mut *state {
        | PromiseState::Done(_) => return false,
        | PromiseState::Pending(waiters) => {
          let waiters = mem::take(waiters);
          *state = PromiseState::Done(outcome.clone());
          waiters
        },
      }
    };
    self.notify(waiters, outcome);
    true
  }

  /// Returns `true` once the outcome is fixed.
  #[must_use]
  pub fn is_done(&self) -> bool {
    matches!(&*self.inner.state.lock(), PromiseState::Done(_))
  }

  /// Returns `true` when the promise was cancelled.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    matches!(&*self.inner.state.lock(), PromiseState::Done(Err(cause)) if cause.is_cancellation())
  }

  /// Returns the outcome without blocking, or `None` while pending.
  #[must_use]
  pub fn try_get(&self) -> Option<Result<T, FlowError>> {
    match &*self.inner.state.lock() {
      | PromiseState::Done(outcome) => Some(outcome.clone()),
      | PromiseState::Pending(_) => None,
    }
  }

  /// Registers a callback receiving the outcome exactly once.
  pub fn when_complete<F>(&self, callback: F)
  where
    F: FnOnce(Result<T, FlowError>) + Send + 'static, {
    self.add_waiter(PromiseWaiter::Callback(Box::new(callback)));
  }

  /// Registers `callback` so that it can be withdrawn with [`remove_waiter`](Self::remove_waiter).
  ///
  /// Returns `None` when the outcome was already fixed; the callback has then run.
  #[cfg_attr(not(feature = "std"), allow(dead_code))]
  pub(crate) fn when_complete_keyed<F>(&self, callback: F) -> Option<WaiterKey>
  where
    F: FnOnce(Result<T, FlowError>) + Send + 'static, {
    let outcome = {
      let mut state = self.inner.state.lock();
      match &mut *state {
        | PromiseState::Done(outcome) => outcome.clone(),
        | PromiseState::Pending(waiters) => {
          let key = WaiterKey(self.inner.next_key.fetch_add(1, Ordering::Relaxed));
          waiters.push(PromiseWaiter::Keyed(key, Box::new(callback)));
          return Some(key);
        },
      }
    };
    callback(outcome);
    None
  }

  /// Withdraws a waiter registered with [`when_complete_keyed`](Self::when_complete_keyed).
  ///
  /// Returns `false` when the waiter is gone, either removed or already notified.
  #[cfg_attr(not(feature = "std"), allow(dead_code))]
  pub(crate) fn remove_waiter(&self, key: WaiterKey) -> bool {
    let mut state = self.inner.state.lock();
    let PromiseState::Pending(waiters) = &mut *state else {
      return false;
    };
    let before = waiters.len();
    waiters.retain(|waiter| !matches!(waiter, PromiseWaiter::Keyed(existing, _) if *existing == key));
    waiters.len() != before
  }

  #[cfg(test)]
  pub(crate) fn waiter_count(&self) -> usize {
    match &*self.inner.state.lock() {
      | PromiseState::Pending(waiters) => waiters.len(),
      | PromiseState::Done(_) => 0,
    }
  }

  /// Returns a future resolving to the outcome.
  #[must_use]
  pub fn listener(&self) -> PromiseListener<T> {
    PromiseListener::new(self.clone())
  }

  /// Returns this promise as a scalar subscriber, so it can be completed by another source.
  #[must_use]
  pub fn as_subscriber(&self) -> ScalarSubscriberShared<T> {
    ArcShared::new(self.clone()).into_dyn(|promise| promise as &dyn ScalarSubscriber<T>)
  }

  /// Derives a promise holding `f(value)`.
  ///
  /// `f` runs in a one-shot node on this promise's executor (inline if none). A failure
  /// of this promise, or an error returned by `f`, fails the derived promise.
  #[must_use]
  pub fn then_apply<U, F>(&self, f: F) -> Promise<U>
  where
    U: Clone + Send + 'static,
    F: FnOnce(T) -> Result<U, ActionError> + Send + 'static, {
    let result = Promise::with_executor_option(self.inner.executor.clone());
    let builder = AsyncProcBuilder::new(self.derived_node_config());
    let input = match ScalarInput::<T>::new(builder.owner()) {
      | Ok(input) => input,
      | Err(error) => return Promise::failed(error.into()),
    };

    let action_input = input.clone();
    let output = result.clone();
    let mut f = Some(f);
    let node = builder.build(move |_ctx| {
      let (Some(value), Some(f)) = (action_input.take(), f.take()) else {
        return Ok(());
      };
      output.complete(f(value)?);
      Ok(())
    });
    let failed = result.clone();
    node.completion().when_complete(move |outcome| {
      if let Err(cause) = outcome {
        failed.complete_exceptionally(cause);
      }
    });
    if let Err(error) = node.start() {
      result.complete_exceptionally(error.into());
      return result;
    }
    self.subscribe_scalar(input.as_scalar_subscriber());
    result
  }

  /// Derives a promise holding `f(self, other)` once both are available.
  ///
  /// The first failure of either source fails the derived promise.
  #[must_use]
  pub fn then_combine<U, V, F>(&self, other: &Promise<U>, f: F) -> Promise<V>
  where
    U: Clone + Send + 'static,
    V: Clone + Send + 'static,
    F: FnOnce(T, U) -> Result<V, ActionError> + Send + 'static, {
    let result = Promise::with_executor_option(self.inner.executor.clone());
    let builder = AsyncProcBuilder::new(self.derived_node_config());
    let inputs = ScalarInput::<T>::new(builder.owner())
      .and_then(|left| ScalarInput::<U>::new(builder.owner()).map(|right| (left, right)));
    let (left, right) = match inputs {
      | Ok(inputs) => inputs,
      | Err(error) => return Promise::failed(error.into()),
    };

    let (action_left, action_right) = (left.clone(), right.clone());
    let output = result.clone();
    let mut f = Some(f);
    let node = builder.build(move |_ctx| {
      let (Some(a), Some(b), Some(f)) = (action_left.take(), action_right.take(), f.take()) else {
        return Ok(());
      };
      output.complete(f(a, b)?);
      Ok(())
    });
    let failed = result.clone();
    node.completion().when_complete(move |outcome| {
      if let Err(cause) = outcome {
        failed.complete_exceptionally(cause);
      }
    });
    if let Err(error) = node.start() {
      result.complete_exceptionally(error.into());
      return result;
    }
    self.subscribe_scalar(left.as_scalar_subscriber());
    other.subscribe_scalar(right.as_scalar_subscriber());
    result
  }

  fn derived_node_config(&self) -> NodeConfig {
    let config = NodeConfig::default().with_name("promise-stage").with_control(ControlMode::Once);
    match &self.inner.executor {
      | Some(executor) => config.with_executor(executor.clone()),
      | None => config,
    }
  }

  /// Registers `waker` unless the outcome is fixed, in which case the outcome is returned.
  pub(super) fn poll_outcome(&self, waker: &Waker) -> Option<Result<T, FlowError>> {
    let mut state = self.inner.state.lock();
    match &mut *state {
      | PromiseState::Done(outcome) => Some(outcome.clone()),
      | PromiseState::Pending(waiters) => {
        let registered =
          waiters.iter().any(|waiter| matches!(waiter, PromiseWaiter::Waker(existing) if existing.will_wake(waker)));
        if !registered {
          waiters.push(PromiseWaiter::Waker(waker.clone()));
        }
        None
      },
    }
  }

  fn add_waiter(&self, waiter: PromiseWaiter<T>) {
    let outcome = {
      let mut state = self.inner.state.lock();
      match &mut *state {
        | PromiseState::Done(outcome) => outcome.clone(),
        | PromiseState::Pending(waiters) => {
          waiters.push(waiter);
          return;
        },
      }
    };
    waiter.notify(outcome);
  }

  fn notify(&self, waiters: Vec<PromiseWaiter<T>>, outcome: Result<T, FlowError>) {
    let mut waiters = waiters.into_iter();
    let Some(first) = waiters.next() else {
      return;
    };
    let rest: Vec<PromiseWaiter<T>> = waiters.collect();
    first.notify(outcome.clone());
    if rest.is_empty() {
      return;
    }
    let Some(executor) = &self.inner.executor else {
      deliver_all(rest, &outcome);
      return;
    };

    let pending = ArcShared::new(SpinSyncMutex::new(Some(rest)));
    let task_pending = pending.clone();
    let task_outcome = outcome.clone();
    let submitted = executor.execute(move || {
      let waiters = task_pending.lock().take();
      if let Some(waiters) = waiters {
        deliver_all(waiters, &task_outcome);
      }
    });
    if submitted.is_err() {
      let waiters = pending.lock().take();
      if let Some(waiters) = waiters {
        deliver_all(waiters, &outcome);
      }
    }
  }
}

fn deliver_all<T: Clone>(waiters: Vec<PromiseWaiter<T>>, outcome: &Result<T, FlowError>) {
  for waiter in waiters {
    waiter.notify(outcome.clone());
  }
}

impl<T> Clone for Promise<T> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl<T> Default for Promise<T>
where
  T: Clone + Send + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<T> PartialEq for Promise<T> {
  fn eq(&self, other: &Self) -> bool {
    self.inner == other.inner
  }
}

impl<T> Eq for Promise<T> {}

impl<T> core::fmt::Debug for Promise<T> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    let done = matches!(&*self.inner.state.lock(), PromiseState::Done(_));
    f.debug_struct("Promise").field("done", &done).finish()
  }
}

impl<T> ScalarPublisher<T> for Promise<T>
where
  T: Clone + Send + 'static,
{
  fn subscribe_scalar(&self, subscriber: ScalarSubscriberShared<T>) {
    self.add_waiter(PromiseWaiter::Subscriber(subscriber));
  }
}

impl<T> ScalarSubscriber<T> for Promise<T>
where
  T: Clone + Send + 'static,
{
  fn on_success(&self, value: T) {
    self.complete(value);
  }

  fn on_error(&self, cause: FlowError) {
    self.complete_exceptionally(cause);
  }
}
