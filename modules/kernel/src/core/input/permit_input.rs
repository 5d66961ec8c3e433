#[cfg(test)]
mod tests;

use pinflow_utils_rs::core::sync::{ArcShared, SpinSyncMutex};

use crate::core::{
  error::{NodeError, ProtocolViolation},
  node::{NodeOwner, Pin, PinPurge},
};

/// Counting semaphore pin.
///
/// Unblocked while at least one permit is available; every run consumes one.
#[derive(Clone)]
pub struct PermitInput {
  inner: ArcShared<PermitInputInner>,
}

struct PermitInputInner {
  pin:     Pin,
  permits: SpinSyncMutex<u64>,
}

impl PermitInput {
  /// Registers a pin on `owner` holding `initial` permits.
  ///
  /// # Errors
  ///
  /// Returns [`NodeError`] when the node no longer accepts pins.
  pub fn new(owner: &NodeOwner, initial: u64) -> Result<Self, NodeError> {
    let pin = owner.register_pin(initial == 0)?;
    let inner = ArcShared::new(PermitInputInner { pin: pin.clone(), permits: SpinSyncMutex::new(initial) });
    pin.set_purge(inner.clone().into_dyn(|inner| inner as &dyn PinPurge));
    Ok(Self { inner })
  }

  /// Adds `count` permits.
  ///
  /// # Errors
  ///
  /// Returns [`ProtocolViolation::Closed`] once the owning node terminated.
  pub fn release(&self, count: u64) -> Result<(), ProtocolViolation> {
    let activation = {
      let mut permits = self.inner.permits.lock();
      if self.inner.pin.is_owner_terminated() {
        return Err(ProtocolViolation::Closed);
      }
      *permits = permits.saturating_add(count);
      if *permits == 0 {
        return Ok(());
      }
      self.inner.pin.turn_on()
    };
    activation.dispatch();
    Ok(())
  }

  /// Returns the available permits.
  #[must_use]
  pub fn permits(&self) -> u64 {
    *self.inner.permits.lock()
  }

  /// Returns the pin.
  #[must_use]
  pub fn pin(&self) -> &Pin {
    &self.inner.pin
  }
}

impl PinPurge for PermitInputInner {
  fn purge(&self) {
    let mut permits = self.permits.lock();
    *permits = permits.saturating_sub(1);
    if *permits == 0 {
      self.pin.turn_off();
    }
  }
}
