//! Single-token pin consumed by each run.

#[cfg(test)]
mod tests;

use pinflow_utils_rs::core::sync::{ArcShared, SpinSyncMutex};

use crate::core::{
  error::{FlowError, NodeError, ProtocolViolation},
  node::{NodeOwner, Pin, PinPurge},
  protocol::{Port, ScalarSubscriber, ScalarSubscriberShared},
};

/// Pin holding at most one token.
///
/// The pin is unblocked while a token is present. After each run the token is cleared
/// unless the action called [`push_back`](Self::push_back). A token posted after the
/// action already [`take`](Self::take)n its own is kept for the next round.
pub struct ScalarInput<T> {
  inner: ArcShared<ScalarInputInner<T>>,
}

struct ScalarInputInner<T> {
  pin:  Pin,
  slot: SpinSyncMutex<ScalarSlot<T>>,
}

struct ScalarSlot<T> {
  value:       Option<T>,
  taken:       bool,
  pushed_back: bool,
}

impl<T> ScalarInput<T>
where
  T: Send + 'static,
{
  /// Registers a new blocked pin on `owner`.
  ///
  /// # Errors
  ///
  /// Returns [`NodeError`] when the node no longer accepts pins.
  pub fn new(owner: &NodeOwner) -> Result<Self, NodeError> {
    let pin = owner.register_pin(true)?;
    let slot = ScalarSlot { value: None, taken: false, pushed_back: false };
    let inner = ArcShared::new(ScalarInputInner { pin: pin.clone(), slot: SpinSyncMutex::new(slot) });
    pin.set_purge(inner.clone().into_dyn(|inner| inner as &dyn PinPurge));
    Ok(Self { inner })
  }

  /// Stores `token` and unblocks the pin.
  ///
  /// # Errors
  ///
  /// Returns [`ProtocolViolation::TokenAlreadySet`] while a token is held and
  /// [`ProtocolViolation::Closed`] once the owning node terminated.
  pub fn post(&self, token: T) -> Result<(), ProtocolViolation> {
    let activation = {
      let mut slot = self.inner.slot.lock();
      if self.inner.pin.is_owner_terminated() {
        return Err(ProtocolViolation::Closed);
      }
      if slot.value.is_some() {
        return Err(ProtocolViolation::TokenAlreadySet);
      }
      slot.value = Some(token);
      self.inner.pin.turn_on()
    };
    activation.dispatch();
    Ok(())
  }

  /// Removes the token. Meant to be called from the owning node's action.
  #[must_use]
  pub fn take(&self) -> Option<T> {
    let mut slot = self.inner.slot.lock();
    let value = slot.value.take();
    if value.is_some() {
      slot.taken = true;
    }
    value
  }

  /// Keeps the current token for the next round instead of clearing it.
  pub fn push_back(&self) {
    self.inner.slot.lock().pushed_back = true;
  }

  /// Returns `true` while a token is held.
  #[must_use]
  pub fn has_token(&self) -> bool {
    self.inner.slot.lock().value.is_some()
  }

  /// Returns the pin.
  #[must_use]
  pub fn pin(&self) -> &Pin {
    &self.inner.pin
  }

  /// Returns this input as a scalar subscriber, so a promise can feed it.
  #[must_use]
  pub fn as_scalar_subscriber(&self) -> ScalarSubscriberShared<T> {
    ArcShared::new(self.clone()).into_dyn(|input| input as &dyn ScalarSubscriber<T>)
  }
}

impl<T> ScalarInput<T>
where
  T: Clone + Send + 'static,
{
  /// Returns a copy of the token.
  #[must_use]
  pub fn current(&self) -> Option<T> {
    self.inner.slot.lock().value.clone()
  }
}

impl<T> Clone for ScalarInput<T> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl<T> PinPurge for ScalarInputInner<T>
where
  T: Send + 'static,
{
  fn purge(&self) {
    let activation = {
      let mut slot = self.slot.lock();
      if !slot.pushed_back && !slot.taken {
        slot.value = None;
      }
      slot.pushed_back = false;
      slot.taken = false;
      if slot.value.is_none() {
        self.pin.turn_off();
        return;
      }
      self.pin.turn_on()
    };
    activation.dispatch();
  }
}

impl<T> Port<T> for ScalarInput<T>
where
  T: Send + 'static,
{
  fn post(&self, token: T) -> Result<(), ProtocolViolation> {
    ScalarInput::post(self, token)
  }
}

impl<T> ScalarSubscriber<T> for ScalarInput<T>
where
  T: Send + 'static,
{
  fn on_success(&self, value: T) {
    if let Err(violation) = self.post(value) {
      self.inner.pin.fail_owner(FlowError::Protocol(violation));
    }
  }

  fn on_error(&self, cause: FlowError) {
    self.inner.pin.fail_owner(cause);
  }
}
