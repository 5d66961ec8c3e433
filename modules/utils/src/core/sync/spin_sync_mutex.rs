use spin::{Mutex, MutexGuard};


/// Spin lock used for every short critical section in `no_std` builds.
///
/// Callers keep the guard for a few field updates and never call user code while
/// holding it; callbacks are collected and run after the guard is dropped.
#[derive(Default)]
pub struct SpinSyncMutex<T>(Mutex<T>);

impl<T> SpinSyncMutex<T> {
  /// Wraps `value`.
  #[must_use]
  pub const fn new(value: T) -> Self {
    Self(Mutex::new(value))
  }

  /// Returns the protected value.
  pub fn into_inner(self) -> T {
    self.0.into_inner()
  }

  /// Spins until the lock is acquired.
  pub fn lock(&self) -> MutexGuard<'_, T> {
    self.0.lock()
  }

  /// Acquires the lock only if it is free.
  pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
    self.0.try_lock()
  }
}
