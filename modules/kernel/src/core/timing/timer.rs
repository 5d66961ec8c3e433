use core::time::Duration;

use super::{TimerCallback, TimerKey};
use crate::core::error::TimerError;

/// Invokes callbacks after a delay.
///
/// Used to realize delayed wake-ups (`awake_after`). Callbacks should be short: they
/// run on the timer's own thread or, for [`ManualTimer`](super::ManualTimer), on the
/// thread advancing the clock.
pub trait Timer: Send + Sync {
  /// Schedules `callback` to run once `delay` has elapsed.
  ///
  /// # Errors
  ///
  /// Returns [`TimerError::ShutDown`] when the timer no longer accepts work.
  fn schedule(&self, delay: Duration, callback: TimerCallback) -> Result<TimerKey, TimerError>;

  /// Cancels a pending callback. Returns `false` if it already ran or was cancelled.
  fn cancel(&self, key: TimerKey) -> bool;
}
