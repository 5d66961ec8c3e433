use core::time::Duration;

use pinflow_utils_rs::core::{
  sync::{ArcShared, SpinSyncMutex},
  time::TimerQueue,
};

use super::{Timer, TimerCallback, TimerKey};
use crate::core::error::TimerError;

#[cfg(test)]
mod tests;

/// Timer driven by an explicit virtual clock.
///
/// Nothing fires until [`ManualTimer::advance`] is called; due callbacks then run on
/// the calling thread in deadline order. Clones share the same clock.
#[derive(Clone)]
pub struct ManualTimer {
  state: ArcShared<SpinSyncMutex<ManualTimerState>>,
}

struct ManualTimerState {
  now:   Duration,
  queue: TimerQueue<Duration, TimerCallback>,
}

impl ManualTimer {
  /// Creates a timer whose clock starts at zero.
  #[must_use]
  pub fn new() -> Self {
    Self { state: ArcShared::new(SpinSyncMutex::new(ManualTimerState { now: Duration::ZERO, queue: TimerQueue::new() })) }
  }

  /// Returns the current virtual time.
  #[must_use]
  pub fn now(&self) -> Duration {
    self.state.lock().now
  }

  /// Returns the number of callbacks waiting to fire.
  #[must_use]
  pub fn pending(&self) -> usize {
    self.state.lock().queue.len()
  }

  /// Moves the clock forward and runs every callback that became due.
  ///
  /// Callbacks scheduled by a firing callback run in the same call if they are due.
  /// Returns the number of callbacks run.
  pub fn advance(&self, delta: Duration) -> usize {
    let now = {
      let mut state = self.state.lock();
      state.now = state.now.saturating_add(delta);
      state.now
    };
    let mut fired = 0;
    loop {
      let due = self.state.lock().queue.pop_expired(now);
      if due.is_empty() {
        return fired;
      }
      for callback in due {
        callback();
        fired += 1;
      }
    }
  }
}

impl Default for ManualTimer {
  fn default() -> Self {
    Self::new()
  }
}

impl Timer for ManualTimer {
  fn schedule(&self, delay: Duration, callback: TimerCallback) -> Result<TimerKey, TimerError> {
    let mut state = self.state.lock();
    let deadline = state.now.saturating_add(delay);
    Ok(state.queue.schedule(deadline, callback))
  }

  fn cancel(&self, key: TimerKey) -> bool {
    self.state.lock().queue.cancel(key)
  }
}
