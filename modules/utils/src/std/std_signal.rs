//! Generation counting condvar signal.

extern crate std;

use std::{
  sync::{Condvar, Mutex, PoisonError},
  time::{Duration, Instant},
};


/// Wakes blocked threads whenever some shared state changes.
///
/// Waiters do not hold the state lock while parked. They read the generation,
/// re-check their own condition, and only then call [`StdSignal::wait_for_change`]
/// with the generation they observed, so a notification between the check and the
/// wait is never lost.
pub struct StdSignal {
  generation: Mutex<u64>,
  condvar:    Condvar,
}

impl StdSignal {
  /// Creates a signal at generation zero.
  #[must_use]
  pub const fn new() -> Self {
    Self { generation: Mutex::new(0), condvar: Condvar::new() }
  }

  /// Returns the current generation.
  #[must_use]
  pub fn generation(&self) -> u64 {
    *self.generation.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Bumps the generation and wakes every waiter.
  pub fn notify_all(&self) {
    let mut generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
    *generation = generation.wrapping_add(1);
    drop(generation);
    self.condvar.notify_all();
  }

  /// Blocks until the generation differs from `observed`.
  pub fn wait_for_change(&self, observed: u64) {
    let mut generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
    while *generation == observed {
      generation = self.condvar.wait(generation).unwrap_or_else(PoisonError::into_inner);
    }
  }

  /// Blocks until the generation differs from `observed` or `deadline` passes.
  ///
  /// Returns `false` on timeout.
  pub fn wait_for_change_until(&self, observed: u64, deadline: Instant) -> bool {
    let mut generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
    while *generation == observed {
      let now = Instant::now();
      if now >= deadline {
        return false;
      }
      let (next, _) =
        self.condvar.wait_timeout(generation, deadline - now).unwrap_or_else(PoisonError::into_inner);
      generation = next;
    }
    true
  }

  /// Same as [`wait_for_change_until`](Self::wait_for_change_until) with a relative timeout.
  pub fn wait_for_change_timeout(&self, observed: u64, timeout: Duration) -> bool {
    match Instant::now().checked_add(timeout) {
      | Some(deadline) => self.wait_for_change_until(observed, deadline),
      | None => {
        self.wait_for_change(observed);
        true
      },
    }
  }
}

impl Default for StdSignal {
  fn default() -> Self {
    Self::new()
  }
}
