//! Bounded queue facade for threads outside the dataflow.

extern crate std;


use core::time::Duration;
use std::time::Instant;

use pinflow_kernel_rs::core::{
  error::{FlowError, ProtocolViolation},
  protocol::{Port, Subscriber, SubscriberShared, SubscriptionShared},
};
use pinflow_utils_rs::{
  core::{
    collections::{BoundedQueue, OverflowPolicy, QueueError},
    sync::ArcShared,
  },
  std::{StdSignal, StdSyncMutex},
};

/// Blocking bounded FIFO shared between external threads and the dataflow.
///
/// Producers call [`put`](Self::put) or post through [`Port`]. Consumers call
/// [`take`](Self::take). Subscribed to a publisher, the queue requests its free
/// capacity up front and one more token for every token taken, so upstream never
/// outruns it. Tokens put by producers count against the same capacity, so a
/// subscribed queue should not also be fed through [`put`](Self::put).
///
/// Never call the blocking methods from a node action.
pub struct BlockingStreamQueue<T> {
  inner: ArcShared<QueueInner<T>>,
}

struct QueueInner<T> {
  state:  StdSyncMutex<QueueState<T>>,
  signal: StdSignal,
}

struct QueueState<T> {
  queue:        BoundedQueue<T>,
  subscription: Option<SubscriptionShared>,
  cause:        Option<FlowError>,
}

impl<T> BlockingStreamQueue<T>
where
  T: Send + 'static,
{
  /// Creates an open queue holding at most `capacity` tokens.
  #[must_use]
  pub fn new(capacity: usize) -> Self {
    let state = QueueState {
      queue:        BoundedQueue::with_capacity(capacity, OverflowPolicy::Block),
      subscription: None,
      cause:        None,
    };
    Self { inner: ArcShared::new(QueueInner { state: StdSyncMutex::new(state), signal: StdSignal::new() }) }
  }

  /// Returns the capacity.
  #[must_use]
  pub fn capacity(&self) -> usize {
    self.inner.state.lock().queue.capacity()
  }

  /// Returns the number of queued tokens.
  #[must_use]
  pub fn len(&self) -> usize {
    self.inner.state.lock().queue.len()
  }

  /// Returns `true` when no token is queued.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.inner.state.lock().queue.is_empty()
  }

  /// Returns `true` once the queue was closed.
  #[must_use]
  pub fn is_closed(&self) -> bool {
    self.inner.state.lock().queue.is_closed()
  }

  /// Returns the upstream failure that closed the queue, if any.
  #[must_use]
  pub fn cause(&self) -> Option<FlowError> {
    self.inner.state.lock().cause.clone()
  }

  /// Returns the queue as a subscriber to attach to a publisher.
  #[must_use]
  pub fn as_subscriber(&self) -> SubscriberShared<T> {
    ArcShared::new(self.clone()).into_dyn(|queue| queue as &dyn Subscriber<T>)
  }

  /// Appends `token`, blocking while the queue is full.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Closed`] with the token once the queue is closed.
  pub fn put(&self, token: T) -> Result<(), QueueError<T>> {
    self.offer_until(token, None)
  }

  /// Appends `token`, waiting at most `timeout` for room.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Full`] with the token on timeout and
  /// [`QueueError::Closed`] once the queue is closed.
  pub fn offer_timeout(&self, token: T, timeout: Duration) -> Result<(), QueueError<T>> {
    self.offer_until(token, Instant::now().checked_add(timeout))
  }

  /// Removes the head token, blocking while the queue is empty.
  ///
  /// Returns `None` once the queue is closed and drained.
  pub fn take(&self) -> Option<T> {
    self.poll_until(None)
  }

  /// Removes the head token, waiting at most `timeout`.
  ///
  /// Returns `None` on timeout or once the queue is closed and drained.
  pub fn poll_timeout(&self, timeout: Duration) -> Option<T> {
    self.poll_until(Instant::now().checked_add(timeout))
  }

  /// Closes the queue and cancels the upstream subscription.
  ///
  /// Queued tokens stay readable. Blocked producers and consumers wake up.
  pub fn close(&self) {
    self.close_with(None);
  }

  fn close_with(&self, cause: Option<FlowError>) {
    let subscription = {
      let mut state = self.inner.state.lock();
      if state.queue.is_closed() {
        return;
      }
      state.queue.close();
      state.cause = cause;
      state.subscription.take()
    };
    self.inner.signal.notify_all();
    if let Some(subscription) = subscription {
      subscription.cancel();
    }
  }

  fn offer_until(&self, token: T, deadline: Option<Instant>) -> Result<(), QueueError<T>> {
    let mut token = token;
    loop {
      let observed = self.inner.signal.generation();
      match self.inner.state.lock().queue.offer(token) {
        | Ok(()) => {
          self.inner.signal.notify_all();
          return Ok(());
        },
        | Err(QueueError::Full(rejected)) => token = rejected,
        | Err(closed) => return Err(closed),
      }
      if !self.wait(observed, deadline) {
        return Err(QueueError::Full(token));
      }
    }
  }

  fn poll_until(&self, deadline: Option<Instant>) -> Option<T> {
    loop {
      let observed = self.inner.signal.generation();
      let (token, replenish) = {
        let mut state = self.inner.state.lock();
        match state.queue.poll() {
          | Some(token) => (Some(token), state.subscription.clone()),
          | None if state.queue.is_closed() => return None,
          | None => (None, None),
        }
      };
      if let Some(token) = token {
        self.inner.signal.notify_all();
        if let Some(subscription) = replenish {
          subscription.request(1);
        }
        return Some(token);
      }
      if !self.wait(observed, deadline) {
        return None;
      }
    }
  }

  fn wait(&self, observed: u64, deadline: Option<Instant>) -> bool {
    match deadline {
      | Some(deadline) => self.inner.signal.wait_for_change_until(observed, deadline),
      | None => {
        self.inner.signal.wait_for_change(observed);
        true
      },
    }
  }
}

impl<T> Clone for BlockingStreamQueue<T> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl<T> Port<T> for BlockingStreamQueue<T>
where
  T: Send + 'static,
{
  fn post(&self, token: T) -> Result<(), ProtocolViolation> {
    let mut state = self.inner.state.lock();
    let capacity = state.queue.capacity();
    let result = match state.queue.offer(token) {
      | Ok(()) => Ok(()),
      | Err(QueueError::Full(_)) => Err(ProtocolViolation::BufferOverflow { capacity }),
      | Err(QueueError::Closed(_)) => Err(ProtocolViolation::Closed),
    };
    drop(state);
    if result.is_ok() {
      self.inner.signal.notify_all();
    }
    result
  }
}

impl<T> Subscriber<T> for BlockingStreamQueue<T>
where
  T: Send + 'static,
{
  fn on_subscribe(&self, subscription: SubscriptionShared) {
    let request = {
      let mut state = self.inner.state.lock();
      if state.queue.is_closed() || state.subscription.is_some() {
        None
      } else {
        state.subscription = Some(subscription.clone());
        Some(state.queue.remaining())
      }
    };
    match request {
      | None => subscription.cancel(),
      | Some(0) => {},
      | Some(n) => subscription.request(i64::try_from(n).unwrap_or(i64::MAX)),
    }
  }

  fn on_next(&self, item: T) {
    if let Err(violation) = self.post(item) {
      if violation == ProtocolViolation::Closed {
        return;
      }
      tracing::warn!(%violation, "upstream sent more tokens than requested");
      self.close_with(Some(FlowError::Protocol(ProtocolViolation::DemandExceeded)));
    }
  }

  fn on_error(&self, cause: FlowError) {
    self.close_with(Some(cause));
  }

  fn on_complete(&self) {
    self.close_with(None);
  }
}
