//! Bounded multi-subscriber publisher with credit based backpressure.

mod output_state;
mod output_subscription;

use alloc::string::String;
use core::fmt;

use pinflow_kernel_rs::core::{
  error::{FlowError, NodeError, ProtocolViolation},
  futures::Promise,
  node::{NodeOwner, Pin},
  protocol::{Port, Publisher, SubscriberShared, Subscription},
};
use pinflow_utils_rs::core::{
  concurrent::DrainGate,
  sync::{ArcShared, SpinSyncMutex},
};

use self::{output_state::OutputState, output_subscription::OutputSubscription};
use super::{BufferListenerShared, BufferSignal, StreamOutputConfig};

/// Publisher handing every accepted token to exactly one subscriber.
///
/// A token goes straight to a subscription that has credit; otherwise it waits in a
/// buffer of bounded capacity and [`offer`](Self::offer) returns `false` once that
/// buffer is full. Subscriptions waking up with fresh credit are served from the
/// buffer oldest first. After [`complete`](Self::complete) the buffered tokens are
/// still handed out, and every remaining subscriber receives the terminal signal
/// once the buffer is empty.
///
/// All subscriber and listener callbacks run after the lock is released, on
/// whichever thread currently drains the delivery queue. Deliveries to one
/// subscriber keep their order.
pub struct StreamOutput<T> {
  core: ArcShared<OutputCore<T>>,
}

struct OutputCore<T> {
  name:     Option<String>,
  capacity: usize,
  state:    SpinSyncMutex<OutputState<T>>,
  gate:     DrainGate,
}

impl<T> OutputCore<T> {
  /// Runs `update` under the lock, then delivers whatever it queued.
  fn with_state<R>(&self, update: impl FnOnce(&mut OutputState<T>) -> R) -> R {
    let mut state = self.state.lock();
    let result = update(&mut state);
    drop(state);
    self.drain();
    result
  }

  fn drain(&self) {
    self.gate.drain_with(
      || {
        loop {
          let next = self.state.lock().pop_delivery();
          match next {
            | Some(delivery) => delivery.run(),
            | None => break,
          }
        }
      },
      || self.state.lock().has_pending(),
    );
  }
}

impl<T> StreamOutput<T>
where
  T: Send + 'static,
{
  /// Creates an empty stream.
  #[must_use]
  pub fn new(config: StreamOutputConfig) -> Self {
    let capacity = config.capacity();
    let core = OutputCore {
      name: config.name().map(String::from),
      capacity,
      state: SpinSyncMutex::new(OutputState::new(capacity)),
      gate: DrainGate::new(),
    };
    Self { core: ArcShared::new(core) }
  }

  /// Creates an unnamed stream buffering up to `capacity` tokens.
  #[must_use]
  pub fn with_capacity(capacity: usize) -> Self {
    Self::new(StreamOutputConfig::new(capacity))
  }

  /// Returns the stream name.
  #[must_use]
  pub fn name(&self) -> Option<&str> {
    self.core.name.as_deref()
  }

  /// Returns the buffer capacity.
  #[must_use]
  pub fn capacity(&self) -> usize {
    self.core.capacity
  }

  /// Returns the number of buffered tokens.
  #[must_use]
  pub fn len(&self) -> usize {
    self.core.state.lock().buffered()
  }

  /// Returns `true` when no token is buffered.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Returns `true` while another token can be buffered.
  #[must_use]
  pub fn has_room(&self) -> bool {
    !self.core.state.lock().is_full()
  }

  /// Returns the number of live subscriptions.
  #[must_use]
  pub fn subscriber_count(&self) -> usize {
    self.core.state.lock().subscriber_count()
  }

  /// Returns `true` once [`complete`](Self::complete) or
  /// [`complete_exceptionally`](Self::complete_exceptionally) was called.
  #[must_use]
  pub fn is_completed(&self) -> bool {
    self.core.state.lock().is_terminal()
  }

  /// Returns `true` once the terminal signal went out to every subscriber.
  #[must_use]
  pub fn is_terminated(&self) -> bool {
    self.core.state.lock().is_finished()
  }

  /// Offers a token.
  ///
  /// Returns `false`, dropping the token, when the buffer is full and no subscription
  /// can take it, or when the stream is completed. A `false` is backpressure, not an
  /// error: the producer should retry later.
  pub fn offer(&self, token: T) -> bool {
    self.core.with_state(|state| state.offer(token)).is_ok()
  }

  /// Removes the oldest buffered token, bypassing subscriptions.
  pub fn poll(&self) -> Option<T> {
    self.core.with_state(OutputState::poll)
  }

  /// Completes the stream normally. Returns `false` if it was already completed.
  pub fn complete(&self) -> bool {
    self.core.with_state(|state| state.complete(Ok(())))
  }

  /// Fails the stream with `cause`. Returns `false` if it was already completed.
  pub fn complete_exceptionally(&self, cause: FlowError) -> bool {
    self.core.with_state(|state| state.complete(Err(cause)))
  }

  /// Completes the stream with the outcome of `promise`, typically a node completion.
  pub fn complete_on(&self, promise: &Promise<()>) {
    let output = self.clone();
    promise.when_complete(move |outcome| {
      match outcome {
        | Ok(()) => output.complete(),
        | Err(cause) => output.complete_exceptionally(cause),
      };
    });
  }

  /// Registers a buffer listener and returns the current occupancy.
  pub fn add_listener(&self, listener: BufferListenerShared) -> BufferSignal {
    let mut state = self.core.state.lock();
    state.add_listener(listener);
    if state.is_full() { BufferSignal::Full } else { BufferSignal::HasRoom }
  }

  /// Registers on `owner` a pin that is unblocked exactly while the buffer has room.
  ///
  /// A producer node owning such a pin only fires when its next offer can succeed.
  ///
  /// # Errors
  ///
  /// Returns [`NodeError`] when the node no longer accepts pins.
  pub fn with_room_pin(&self, owner: &NodeOwner) -> Result<Pin, NodeError> {
    let mut state = self.core.state.lock();
    let pin = owner.register_pin(state.is_full())?;
    state.add_room_pin(pin.clone());
    Ok(pin)
  }
}

impl<T> Clone for StreamOutput<T> {
  fn clone(&self) -> Self {
    Self { core: self.core.clone() }
  }
}

impl<T> Publisher<T> for StreamOutput<T>
where
  T: Send + 'static,
{
  fn subscribe(&self, subscriber: SubscriberShared<T>) {
    let core = self.core.clone();
    self.core.with_state(|state| {
      let id = state.allocate_id();
      let subscription =
        ArcShared::new(OutputSubscription::new(id, core)).into_dyn(|subscription| subscription as &dyn Subscription);
      state.register(id, subscriber, subscription);
    });
  }
}

impl<T> Port<T> for StreamOutput<T>
where
  T: Send + 'static,
{
  fn post(&self, token: T) -> Result<(), ProtocolViolation> {
    self.core.with_state(|state| state.offer(token))
  }
}

impl<T> fmt::Debug for StreamOutput<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("StreamOutput").field("name", &self.core.name).field("capacity", &self.core.capacity).finish()
  }
}
