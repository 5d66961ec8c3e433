//! Queue backed pin fed by a publisher.

#[cfg(test)]
mod tests;

use pinflow_kernel_rs::core::{
  error::{FlowError, NodeError, ProtocolViolation},
  node::{Activation, NodeOwner, Pin, PinPurge},
  protocol::{Subscriber, SubscriberShared, SubscriptionShared},
};
use pinflow_utils_rs::core::{
  collections::{BoundedQueue, OverflowPolicy},
  sync::{ArcShared, SpinSyncMutex},
};

use super::StreamInputConfig;

/// Pin holding a queue of tokens delivered by an upstream publisher.
///
/// The pin is unblocked while tokens are queued. Each run consumes the head token
/// unless the action [`take`](Self::take)s tokens itself or calls
/// [`push_back`](Self::push_back). Demand is requested from the upstream
/// subscription so that queued plus outstanding tokens never exceed the capacity.
///
/// Once the upstream completes or fails, the queued tokens are still delivered in
/// order. When the queue is then empty the pin stays unblocked for one more run in
/// which [`is_completed`](Self::is_completed) reports `true`; after that run it
/// blocks for good.
pub struct StreamInput<T> {
  inner: ArcShared<StreamInputInner<T>>,
}

struct StreamInputInner<T> {
  pin:             Pin,
  capacity:        usize,
  initial_request: usize,
  state:           SpinSyncMutex<InputState<T>>,
}

struct InputState<T> {
  queue:          BoundedQueue<T>,
  subscription:   Option<SubscriptionShared>,
  outstanding:    usize,
  closed:         bool,
  cause:          Option<FlowError>,
  taken:          bool,
  pushed_back:    bool,
  completion_run: bool,
}

impl<T> InputState<T> {
  fn is_completed(&self) -> bool {
    self.closed && self.queue.is_empty()
  }

  /// Demand that can be requested without overrunning the queue.
  fn room(&self, capacity: usize) -> usize {
    capacity.saturating_sub(self.queue.len() + self.outstanding)
  }
}

impl<T> StreamInput<T>
where
  T: Send + 'static,
{
  /// Registers a new blocked pin on `owner`.
  ///
  /// # Errors
  ///
  /// Returns [`NodeError`] when the node no longer accepts pins.
  pub fn new(owner: &NodeOwner, config: StreamInputConfig) -> Result<Self, NodeError> {
    let pin = owner.register_pin(true)?;
    let state = InputState {
      queue:          BoundedQueue::with_capacity(config.capacity(), OverflowPolicy::Block),
      subscription:   None,
      outstanding:    0,
      closed:         false,
      cause:          None,
      taken:          false,
      pushed_back:    false,
      completion_run: false,
    };
    let inner = ArcShared::new(StreamInputInner {
      pin: pin.clone(),
      capacity: config.capacity(),
      initial_request: config.initial_request(),
      state: SpinSyncMutex::new(state),
    });
    pin.set_purge(inner.clone().into_dyn(|inner| inner as &dyn PinPurge));
    Ok(Self { inner })
  }

  /// Returns the pin.
  #[must_use]
  pub fn pin(&self) -> &Pin {
    &self.inner.pin
  }

  /// Returns the queue capacity.
  #[must_use]
  pub fn capacity(&self) -> usize {
    self.inner.capacity
  }

  /// Returns the number of queued tokens.
  #[must_use]
  pub fn len(&self) -> usize {
    self.inner.state.lock().queue.len()
  }

  /// Returns `true` when no token is queued.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns this input as a subscriber, to hand to a publisher.
  #[must_use]
  pub fn as_subscriber(&self) -> SubscriberShared<T> {
    ArcShared::new(self.clone()).into_dyn(|input| input as &dyn Subscriber<T>)
  }

  /// Removes the head token. Meant to be called from the owning node's action.
  #[must_use]
  pub fn take(&self) -> Option<T> {
    let mut state = self.inner.state.lock();
    let token = state.queue.poll();
    if token.is_some() {
      state.taken = true;
    }
    token
  }

  /// Keeps the head token for the next round instead of consuming it.
  pub fn push_back(&self) {
    self.inner.state.lock().pushed_back = true;
  }

  /// Returns `true` once upstream terminated and every queued token was consumed.
  #[must_use]
  pub fn is_completed(&self) -> bool {
    self.inner.state.lock().is_completed()
  }

  /// Returns `true` once upstream terminated, even if tokens remain queued.
  #[must_use]
  pub fn is_closed(&self) -> bool {
    self.inner.state.lock().closed
  }

  /// Returns the upstream failure, if the stream ended with one.
  #[must_use]
  pub fn cause(&self) -> Option<FlowError> {
    self.inner.state.lock().cause.clone()
  }

  /// Cancels the upstream subscription and closes the pin. Queued tokens stay readable.
  pub fn cancel(&self) {
    let (subscription, activation) = {
      let mut state = self.inner.state.lock();
      if state.closed {
        return;
      }
      state.closed = true;
      let activation = self.inner.pin.turn_on();
      (state.subscription.take(), activation)
    };
    activation.dispatch();
    if let Some(subscription) = subscription {
      subscription.cancel();
    }
  }
}

impl<T> StreamInput<T>
where
  T: Clone + Send + 'static,
{
  /// Returns a copy of the head token.
  #[must_use]
  pub fn current(&self) -> Option<T> {
    self.inner.state.lock().queue.peek().cloned()
  }
}

impl<T> Clone for StreamInput<T> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl<T> StreamInputInner<T>
where
  T: Send + 'static,
{
  /// Closes the pin with `cause`; the pin is unblocked so the node observes the end.
  fn close(&self, cause: Option<FlowError>) -> (Option<SubscriptionShared>, Activation) {
    let mut state = self.state.lock();
    if state.closed {
      return (None, Activation::none());
    }
    state.closed = true;
    state.cause = cause;
    (state.subscription.take(), self.pin.turn_on())
  }
}

impl<T> PinPurge for StreamInputInner<T>
where
  T: Send + 'static,
{
  fn purge(&self) {
    let (request, activation) = {
      let mut state = self.state.lock();
      if state.is_completed() {
        state.completion_run = true;
      } else if !state.taken && !state.pushed_back {
        state.queue.poll();
      }
      state.taken = false;
      state.pushed_back = false;

      let mut request = None;
      if !state.closed {
        let room = state.room(self.capacity);
        if room > 0 {
          if let Some(subscription) = state.subscription.clone() {
            state.outstanding += room;
            request = Some((subscription, room));
          }
        }
      }

      let activation = if !state.queue.is_empty() || (state.closed && !state.completion_run) {
        self.pin.turn_on()
      } else {
        self.pin.turn_off();
        Activation::none()
      };
      (request, activation)
    };
    activation.dispatch();
    if let Some((subscription, n)) = request {
      subscription.request(i64::try_from(n).unwrap_or(i64::MAX));
    }
  }
}

impl<T> Subscriber<T> for StreamInput<T>
where
  T: Send + 'static,
{
  fn on_subscribe(&self, subscription: SubscriptionShared) {
    let request = {
      let mut state = self.inner.state.lock();
      if state.closed || state.subscription.is_some() || self.inner.pin.is_owner_terminated() {
        None
      } else {
        let n = self.inner.initial_request.min(state.room(self.inner.capacity));
        state.outstanding += n;
        state.subscription = Some(subscription.clone());
        Some(n)
      }
    };
    match request {
      | None => subscription.cancel(),
      | Some(0) => {},
      | Some(n) => subscription.request(i64::try_from(n).unwrap_or(i64::MAX)),
    }
  }

  fn on_next(&self, item: T) {
    let inner = &self.inner;
    let (activation, cancel) = {
      let mut state = inner.state.lock();
      if state.closed {
        return;
      }
      if inner.pin.is_owner_terminated() {
        state.closed = true;
        (Activation::none(), state.subscription.take())
      } else if state.outstanding == 0 || state.queue.offer(item).is_err() {
        state.closed = true;
        state.cause = Some(FlowError::Protocol(ProtocolViolation::DemandExceeded));
        (inner.pin.turn_on(), state.subscription.take())
      } else {
        state.outstanding -= 1;
        (inner.pin.turn_on(), None)
      }
    };
    activation.dispatch();
    if let Some(subscription) = cancel {
      subscription.cancel();
    }
  }

  fn on_error(&self, cause: FlowError) {
    let (_, activation) = self.inner.close(Some(cause));
    activation.dispatch();
  }

  fn on_complete(&self) {
    let (_, activation) = self.inner.close(None);
    activation.dispatch();
  }
}
