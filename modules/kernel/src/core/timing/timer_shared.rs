use alloc::boxed::Box;
use core::{fmt, time::Duration};

use pinflow_utils_rs::core::sync::ArcShared;

use super::{Timer, TimerKey};
use crate::core::error::TimerError;

/// Cloneable handle to a [`Timer`].
#[derive(Clone)]
pub struct TimerShared {
  inner: ArcShared<dyn Timer>,
}

impl TimerShared {
  /// Wraps a timer.
  #[must_use]
  pub fn new<T>(timer: T) -> Self
  where
    T: Timer + 'static, {
    Self { inner: ArcShared::new(timer).into_dyn(|timer| timer as &dyn Timer) }
  }

  /// Wraps an already shared timer.
  #[must_use]
  pub const fn from_shared(inner: ArcShared<dyn Timer>) -> Self {
    Self { inner }
  }

  /// Schedules a closure.
  ///
  /// # Errors
  ///
  /// Returns [`TimerError`] when the timer refuses the schedule.
  pub fn schedule<F>(&self, delay: Duration, callback: F) -> Result<TimerKey, TimerError>
  where
    F: FnOnce() + Send + 'static, {
    self.inner.schedule(delay, Box::new(callback))
  }

  /// Cancels a pending callback.
  #[must_use]
  pub fn cancel(&self, key: TimerKey) -> bool {
    self.inner.cancel(key)
  }
}

impl fmt::Debug for TimerShared {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TimerShared").finish_non_exhaustive()
  }
}
