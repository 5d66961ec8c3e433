//! Drain ownership flag used to serialize deliveries without holding a lock.

use core::sync::atomic::Ordering;

use portable_atomic::AtomicBool;

#[cfg(test)]
mod tests;

/// Elects a single "drain owner" among concurrent producers.
///
/// Producers push work into a locked queue and then call [`DrainGate::drain_with`].
/// The first caller becomes the owner and processes the queue, every other caller
/// returns immediately and leaves its work to the owner. Re-entrant calls made from
/// inside `drain` behave like any other concurrent producer, so callbacks may push
/// more work without deadlocking.
pub struct DrainGate {
  running: AtomicBool,
}

impl DrainGate {
  /// Creates an idle gate.
  #[must_use]
  pub const fn new() -> Self {
    Self { running: AtomicBool::new(false) }
  }

  /// Attempts to become the drain owner.
  #[must_use]
  pub fn try_acquire(&self) -> bool {
    self.running.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_ok()
  }

  /// Releases drain ownership.
  pub fn release(&self) {
    self.running.store(false, Ordering::Release);
  }

  /// Returns `true` while some thread owns the gate.
  #[must_use]
  pub fn is_draining(&self) -> bool {
    self.running.load(Ordering::Acquire)
  }

  /// Runs `drain` as the owner until `has_pending` reports an empty queue.
  ///
  /// `drain` must process every item currently queued. After releasing ownership the
  /// queue is checked again so that work pushed during the release is not stranded.
  /// Returns `true` when the caller drained at least once.
  pub fn drain_with<D, P>(&self, mut drain: D, mut has_pending: P) -> bool
  where
    D: FnMut(),
    P: FnMut() -> bool, {
    let mut drained = false;
    loop {
      if !self.try_acquire() {
        return drained;
      }
      drain();
      drained = true;
      self.release();
      if !has_pending() {
        return drained;
      }
    }
  }
}

impl Default for DrainGate {
  fn default() -> Self {
    Self::new()
  }
}
