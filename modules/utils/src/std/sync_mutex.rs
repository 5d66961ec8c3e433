extern crate std;

use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(test)]
mod tests;

/// [`std::sync::Mutex`] wrapper that ignores poisoning.
///
/// A panicking user callback must not wedge the kernel, so a poisoned lock hands out
/// the inner value as is.
#[derive(Default)]
pub struct StdSyncMutex<T>(Mutex<T>);

impl<T> StdSyncMutex<T> {
  /// Creates a new mutex.
  #[must_use]
  pub const fn new(value: T) -> Self {
    Self(Mutex::new(value))
  }

  /// Consumes the mutex and returns the inner value.
  pub fn into_inner(self) -> T {
    self.0.into_inner().unwrap_or_else(PoisonError::into_inner)
  }

  /// Locks the mutex, recovering from poisoning.
  ///
  /// The guard is a plain [`MutexGuard`], so it can be handed to a `Condvar`.
  pub fn lock(&self) -> MutexGuard<'_, T> {
    self.0.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Returns `true` if a holder panicked.
  #[must_use]
  pub fn is_poisoned(&self) -> bool {
    self.0.is_poisoned()
  }
}
