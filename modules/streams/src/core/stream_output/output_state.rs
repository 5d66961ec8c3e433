use alloc::{collections::VecDeque, vec::Vec};
use core::mem;

use ahash::RandomState;
use hashbrown::HashMap;
use pinflow_kernel_rs::core::{
  error::{FlowError, ProtocolViolation},
  node::{Activation, Pin},
  protocol::{SubscriberShared, SubscriptionShared},
};
use pinflow_utils_rs::core::collections::{BoundedQueue, OverflowPolicy};

use crate::core::{BufferListenerShared, BufferSignal, CreditTracker};

pub(super) type SubscriptionId = u64;

/// A callback to run once the lock is released.
pub(super) enum Delivery<T> {
  Subscribe { subscriber: SubscriberShared<T>, subscription: SubscriptionShared },
  Next { id: SubscriptionId, subscriber: SubscriberShared<T>, token: T },
  Error { id: SubscriptionId, subscriber: SubscriberShared<T>, cause: FlowError },
  Complete { id: SubscriptionId, subscriber: SubscriberShared<T> },
  Signal { signal: BufferSignal, listeners: Vec<BufferListenerShared> },
  Activate(Activation),
}

impl<T> Delivery<T> {
  pub(super) fn run(self) {
    match self {
      | Delivery::Subscribe { subscriber, subscription } => subscriber.on_subscribe(subscription),
      | Delivery::Next { subscriber, token, .. } => subscriber.on_next(token),
      | Delivery::Error { subscriber, cause, .. } => subscriber.on_error(cause),
      | Delivery::Complete { subscriber, .. } => subscriber.on_complete(),
      | Delivery::Signal { signal, listeners } => {
        for listener in listeners {
          listener.on_signal(signal);
        }
      },
      | Delivery::Activate(activation) => activation.dispatch(),
    }
  }

  const fn target(&self) -> Option<SubscriptionId> {
    match self {
      | Delivery::Next { id, .. } | Delivery::Error { id, .. } | Delivery::Complete { id, .. } => Some(*id),
      | Delivery::Subscribe { .. } | Delivery::Signal { .. } | Delivery::Activate(_) => None,
    }
  }
}

struct SubscriptionSlot<T> {
  subscriber: SubscriberShared<T>,
  credit:     CreditTracker,
}

/// Everything a publisher guards with its single lock.
///
/// Subscriptions with credit sit in `active` exactly once, in hand-over order. Tokens
/// are only buffered while `active` is empty, so a buffered token always precedes any
/// token offered later. Room pins are switched under the lock, in step with the
/// buffer; only the resulting submissions wait for the outbox.
pub(super) struct OutputState<T> {
  buffer:        BoundedQueue<T>,
  subscriptions: HashMap<SubscriptionId, SubscriptionSlot<T>, RandomState>,
  active:        VecDeque<SubscriptionId>,
  terminal:      Option<Result<(), FlowError>>,
  finished:      bool,
  full:          bool,
  next_id:       SubscriptionId,
  outbox:        VecDeque<Delivery<T>>,
  listeners:     Vec<BufferListenerShared>,
  room_pins:     Vec<Pin>,
}

impl<T> OutputState<T> {
  pub(super) fn new(capacity: usize) -> Self {
    Self {
      buffer:        BoundedQueue::with_capacity(capacity, OverflowPolicy::Block),
      subscriptions: HashMap::with_hasher(RandomState::new()),
      active:        VecDeque::new(),
      terminal:      None,
      finished:      false,
      full:          false,
      next_id:       0,
      outbox:        VecDeque::new(),
      listeners:     Vec::new(),
      room_pins:     Vec::new(),
    }
  }

  pub(super) fn buffered(&self) -> usize {
    self.buffer.len()
  }

  pub(super) const fn is_full(&self) -> bool {
    self.full
  }

  pub(super) const fn is_terminal(&self) -> bool {
    self.terminal.is_some()
  }

  pub(super) const fn is_finished(&self) -> bool {
    self.finished
  }

  pub(super) fn subscriber_count(&self) -> usize {
    self.subscriptions.len()
  }

  pub(super) fn has_pending(&self) -> bool {
    !self.outbox.is_empty()
  }

  pub(super) fn pop_delivery(&mut self) -> Option<Delivery<T>> {
    self.outbox.pop_front()
  }

  pub(super) const fn allocate_id(&mut self) -> SubscriptionId {
    let id = self.next_id;
    self.next_id = self.next_id.wrapping_add(1);
    id
  }

  /// Adds a passive subscription, or replays the terminal signal once finished.
  pub(super) fn register(&mut self, id: SubscriptionId, subscriber: SubscriberShared<T>, subscription: SubscriptionShared) {
    self.outbox.push_back(Delivery::Subscribe { subscriber: subscriber.clone(), subscription });
    if self.finished {
      self.outbox.push_back(terminal_delivery(id, subscriber, self.terminal.as_ref()));
      return;
    }
    self.subscriptions.insert(id, SubscriptionSlot { subscriber, credit: CreditTracker::new() });
  }

  pub(super) fn add_listener(&mut self, listener: BufferListenerShared) {
    self.listeners.push(listener);
  }

  pub(super) fn add_room_pin(&mut self, pin: Pin) {
    self.room_pins.push(pin);
  }

  /// Hands `token` to the next subscription with credit, or buffers it.
  pub(super) fn offer(&mut self, token: T) -> Result<(), ProtocolViolation> {
    if self.terminal.is_some() {
      return Err(ProtocolViolation::Closed);
    }
    if let Some(id) = self.next_active() {
      self.hand_over(id, token);
      return Ok(());
    }
    if self.buffer.offer(token).is_err() {
      return Err(ProtocolViolation::BufferOverflow { capacity: self.buffer.capacity() });
    }
    self.refresh_signal();
    Ok(())
  }

  pub(super) fn poll(&mut self) -> Option<T> {
    let token = self.buffer.poll();
    self.settle();
    token
  }

  pub(super) fn request(&mut self, id: SubscriptionId, n: i64) {
    let Some(slot) = self.subscriptions.get_mut(&id) else {
      return;
    };
    match slot.credit.grant(n) {
      | Err(violation) => {
        if let Some(slot) = self.remove(id) {
          let cause = FlowError::Protocol(violation);
          self.outbox.push_back(Delivery::Error { id, subscriber: slot.subscriber, cause });
        }
        self.pump();
      },
      | Ok(false) => {},
      | Ok(true) => {
        // a subscription waking up is served from the buffer before anyone else
        while slot.credit.has_credit() {
          let Some(token) = self.buffer.poll() else {
            break;
          };
          slot.credit.consume_one();
          self.outbox.push_back(Delivery::Next { id, subscriber: slot.subscriber.clone(), token });
        }
        if slot.credit.has_credit() {
          self.active.push_back(id);
        }
      },
    }
    self.settle();
  }

  pub(super) fn cancel(&mut self, id: SubscriptionId) {
    // 終端後は slot が無くても配送キューに残った分を取り消す
    let removed = self.remove(id).is_some();
    if removed || self.strip_deliveries(id) {
      self.pump();
      self.settle();
    }
  }

  /// Records the terminal outcome. Returns `false` if one was already recorded.
  pub(super) fn complete(&mut self, outcome: Result<(), FlowError>) -> bool {
    if self.terminal.is_some() {
      return false;
    }
    self.terminal = Some(outcome);
    self.settle();
    true
  }

  fn next_active(&mut self) -> Option<SubscriptionId> {
    while let Some(id) = self.active.pop_front() {
      if self.subscriptions.get(&id).is_some_and(|slot| slot.credit.has_credit()) {
        return Some(id);
      }
    }
    None
  }

  fn hand_over(&mut self, id: SubscriptionId, token: T) {
    let Some(slot) = self.subscriptions.get_mut(&id) else {
      self.buffer.push_front(token);
      return;
    };
    slot.credit.consume_one();
    self.outbox.push_back(Delivery::Next { id, subscriber: slot.subscriber.clone(), token });
    if slot.credit.has_credit() {
      self.active.push_back(id);
    }
  }

  /// Moves buffered tokens to subscriptions with credit, oldest first.
  fn pump(&mut self) {
    while !self.buffer.is_empty() {
      let Some(id) = self.next_active() else {
        return;
      };
      let Some(token) = self.buffer.poll() else {
        self.active.push_front(id);
        return;
      };
      self.hand_over(id, token);
    }
  }

  /// Removes a subscription and takes back the tokens still queued for it.
  fn remove(&mut self, id: SubscriptionId) -> Option<SubscriptionSlot<T>> {
    let slot = self.subscriptions.remove(&id)?;
    self.active.retain(|candidate| *candidate != id);
    self.strip_deliveries(id);
    Some(slot)
  }

  /// Drops every queued delivery addressed to `id`. Undelivered tokens go back to the
  /// front of the buffer in their original order.
  fn strip_deliveries(&mut self, id: SubscriptionId) -> bool {
    let mut stripped = false;
    let mut reclaimed = Vec::new();
    for delivery in mem::take(&mut self.outbox) {
      match delivery {
        | Delivery::Next { id: target, token, .. } if target == id => reclaimed.push(token),
        | other if other.target() == Some(id) => {},
        | other => {
          self.outbox.push_back(other);
          continue;
        },
      }
      stripped = true;
    }
    for token in reclaimed.into_iter().rev() {
      self.buffer.push_front(token);
    }
    stripped
  }

  fn settle(&mut self) {
    self.refresh_signal();
    self.try_finish();
  }

  fn refresh_signal(&mut self) {
    let full = self.buffer.is_full();
    if full == self.full {
      return;
    }
    self.full = full;
    for pin in &self.room_pins {
      if full {
        pin.turn_off();
      } else {
        self.outbox.push_back(Delivery::Activate(pin.turn_on()));
      }
    }
    if !self.listeners.is_empty() {
      let signal = if full { BufferSignal::Full } else { BufferSignal::HasRoom };
      self.outbox.push_back(Delivery::Signal { signal, listeners: self.listeners.clone() });
    }
  }

  /// Delivers the terminal signal to every subscription once the buffer drained.
  fn try_finish(&mut self) {
    if self.finished || self.terminal.is_none() || !self.buffer.is_empty() {
      return;
    }
    self.finished = true;
    self.active.clear();
    let terminal = self.terminal.as_ref();
    for (id, slot) in self.subscriptions.drain() {
      self.outbox.push_back(terminal_delivery(id, slot.subscriber, terminal));
    }
  }
}

fn terminal_delivery<T>(
  id: SubscriptionId,
  subscriber: SubscriberShared<T>,
  terminal: Option<&Result<(), FlowError>>,
) -> Delivery<T> {
  match terminal {
    | Some(Err(cause)) => Delivery::Error { id, subscriber, cause: cause.clone() },
    | Some(Ok(())) | None => Delivery::Complete { id, subscriber },
  }
}
