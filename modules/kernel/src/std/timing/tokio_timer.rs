extern crate std;


use core::time::Duration;

use ahash::RandomState;
use hashbrown::HashMap;
use pinflow_utils_rs::{core::sync::ArcShared, std::StdSyncMutex};
use portable_atomic::{AtomicU64, Ordering};
use tokio::{runtime::Handle, task::AbortHandle};

use crate::core::{
  error::TimerError,
  timing::{Timer, TimerCallback, TimerKey},
};

/// [`Timer`] backed by `tokio::time::sleep` on a runtime handle.
///
/// Each schedule spawns one sleeping task; cancelling aborts it.
pub struct TokioTimer {
  handle: Handle,
  inner:  ArcShared<TokioTimerInner>,
}

struct TokioTimerInner {
  next_key: AtomicU64,
  pending:  StdSyncMutex<HashMap<TimerKey, AbortHandle, RandomState>>,
}

impl TokioTimer {
  /// Creates a timer spawning on `handle`.
  #[must_use]
  pub fn new(handle: Handle) -> Self {
    let inner =
      TokioTimerInner { next_key: AtomicU64::new(0), pending: StdSyncMutex::new(HashMap::with_hasher(RandomState::new())) };
    Self { handle, inner: ArcShared::new(inner) }
  }

  /// Creates a timer on the runtime of the calling context.
  ///
  /// # Errors
  ///
  /// Returns [`TimerError::ShutDown`] outside a Tokio runtime.
  pub fn current() -> Result<Self, TimerError> {
    Handle::try_current().map(Self::new).map_err(|_| TimerError::ShutDown)
  }

  /// Returns the number of callbacks still waiting for their deadline.
  #[must_use]
  pub fn pending(&self) -> usize {
    self.inner.pending.lock().len()
  }
}

impl Timer for TokioTimer {
  fn schedule(&self, delay: Duration, callback: TimerCallback) -> Result<TimerKey, TimerError> {
    let key = TimerKey::new(self.inner.next_key.fetch_add(1, Ordering::Relaxed));
    let inner = self.inner.clone();
    // held across spawn so the task cannot look the key up before it is inserted
    let mut pending = self.inner.pending.lock();
    let task = self.handle.spawn(async move {
      tokio::time::sleep(delay).await;
      if inner.pending.lock().remove(&key).is_some() {
        callback();
      }
    });
    pending.insert(key, task.abort_handle());
    Ok(key)
  }

  fn cancel(&self, key: TimerKey) -> bool {
    let Some(task) = self.inner.pending.lock().remove(&key) else {
      return false;
    };
    task.abort();
    true
  }
}

impl Drop for TokioTimer {
  fn drop(&mut self) {
    for (_, task) in self.inner.pending.lock().drain() {
      task.abort();
    }
  }
}
