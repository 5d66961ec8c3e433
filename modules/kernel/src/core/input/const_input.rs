#[cfg(test)]
mod tests;

use pinflow_utils_rs::core::sync::{ArcShared, SpinSyncMutex};

use crate::core::{
  error::{FlowError, NodeError, ProtocolViolation},
  node::{NodeOwner, Pin},
  protocol::{Port, ScalarSubscriber, ScalarSubscriberShared},
};

/// Single-token pin whose token is never consumed.
///
/// Once set the pin stays unblocked for the lifetime of the node.
pub struct ConstInput<T> {
  inner: ArcShared<ConstInputInner<T>>,
}

struct ConstInputInner<T> {
  pin:   Pin,
  value: SpinSyncMutex<Option<T>>,
}

impl<T> ConstInput<T>
where
  T: Clone + Send + 'static,
{
  /// Registers a new blocked pin on `owner`.
  ///
  /// # Errors
  ///
  /// Returns [`NodeError`] when the node no longer accepts pins.
  pub fn new(owner: &NodeOwner) -> Result<Self, NodeError> {
    let pin = owner.register_pin(true)?;
    Ok(Self { inner: ArcShared::new(ConstInputInner { pin, value: SpinSyncMutex::new(None) }) })
  }

  /// Sets the value.
  ///
  /// # Errors
  ///
  /// Returns [`ProtocolViolation::TokenAlreadySet`] on a second post and
  /// [`ProtocolViolation::Closed`] once the owning node terminated.
  pub fn post(&self, token: T) -> Result<(), ProtocolViolation> {
    let activation = {
      let mut value = self.inner.value.lock();
      if self.inner.pin.is_owner_terminated() {
        return Err(ProtocolViolation::Closed);
      }
      if value.is_some() {
        return Err(ProtocolViolation::TokenAlreadySet);
      }
      *value = Some(token);
      self.inner.pin.turn_on()
    };
    activation.dispatch();
    Ok(())
  }

  /// Returns a copy of the value.
  #[must_use]
  pub fn current(&self) -> Option<T> {
    self.inner.value.lock().clone()
  }

  /// Returns the pin.
  #[must_use]
  pub fn pin(&self) -> &Pin {
    &self.inner.pin
  }

  /// Returns this input as a scalar subscriber.
  #[must_use]
  pub fn as_scalar_subscriber(&self) -> ScalarSubscriberShared<T> {
    ArcShared::new(self.clone()).into_dyn(|input| input as &dyn ScalarSubscriber<T>)
  }
}

impl<T> Clone for ConstInput<T> {
  fn clone(&self) -> Self {
    Self { inner: self.inner.clone() }
  }
}

impl<T> Port<T> for ConstInput<T>
where
  T: Clone + Send + 'static,
{
  fn post(&self, token: T) -> Result<(), ProtocolViolation> {
    ConstInput::post(self, token)
  }
}

impl<T> ScalarSubscriber<T> for ConstInput<T>
where
  T: Clone + Send + 'static,
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
