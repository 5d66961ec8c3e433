//! Timer driven by a dedicated background thread.

extern crate std;


use alloc::string::String;
use std::{
  panic::{AssertUnwindSafe, catch_unwind},
  sync::{Condvar, MutexGuard, PoisonError},
  thread::{self, JoinHandle},
  time::{Duration, Instant},
};

use pinflow_utils_rs::{
  core::{sync::ArcShared, time::TimerQueue},
  std::StdSyncMutex,
};

use crate::{
  core::{
    error::TimerError,
    timing::{Timer, TimerCallback, TimerKey},
  },
  std::node::panic_message,
};

/// Longest delay honoured as is; longer delays are clamped to it.
const MAX_DELAY: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// [`Timer`] firing callbacks on its own thread.
///
/// Callbacks run one after another on the timer thread, so they must be short. The
/// thread stops on [`shutdown`](Self::shutdown) or when the timer is dropped; pending
/// callbacks are discarded.
pub struct ThreadTimer {
  shared: ArcShared<TimerCore>,
  thread: StdSyncMutex<Option<JoinHandle<()>>>,
}

struct TimerCore {
  state:   StdSyncMutex<TimerState>,
  condvar: Condvar,
}

struct TimerState {
  queue:    TimerQueue<Instant, TimerCallback>,
  shutdown: bool,
}

impl ThreadTimer {
  /// Starts a timer thread named `pinflow-timer`.
  ///
  /// # Errors
  ///
  /// Returns [`TimerError::ShutDown`] when the thread cannot be spawned.
  pub fn new() -> Result<Self, TimerError> {
    Self::with_name("pinflow-timer")
  }

  /// Starts a timer thread with the given name.
  ///
  /// # Errors
  ///
  /// Returns [`TimerError::ShutDown`] when the thread cannot be spawned.
  pub fn with_name(name: impl Into<String>) -> Result<Self, TimerError> {
    let state = TimerState { queue: TimerQueue::new(), shutdown: false };
    let shared = ArcShared::new(TimerCore { state: StdSyncMutex::new(state), condvar: Condvar::new() });
    let core = shared.clone();
    let handle = thread::Builder::new().name(name.into()).spawn(move || core.run()).map_err(|error| {
      tracing::warn!(%error, "failed to spawn timer thread");
      TimerError::ShutDown
    })?;
    Ok(Self { shared, thread: StdSyncMutex::new(Some(handle)) })
  }

  /// Returns the number of callbacks still waiting for their deadline.
  #[must_use]
  pub fn pending(&self) -> usize {
    self.shared.state.lock().queue.len()
  }

  /// Stops the timer thread and discards pending callbacks.
  pub fn shutdown(&self) {
    let discarded = {
      let mut state = self.shared.state.lock();
      if state.shutdown {
        return;
      }
      state.shutdown = true;
      core::mem::replace(&mut state.queue, TimerQueue::new())
    };
    self.shared.condvar.notify_all();
    if !discarded.is_empty() {
      tracing::debug!(discarded = discarded.len(), "timer shut down with pending callbacks");
    }
    drop(discarded);
    let Some(handle) = self.thread.lock().take() else {
      return;
    };
    if handle.thread().id() != thread::current().id() && handle.join().is_err() {
      tracing::warn!("timer thread terminated abnormally");
    }
  }
}

impl Timer for ThreadTimer {
  fn schedule(&self, delay: Duration, callback: TimerCallback) -> Result<TimerKey, TimerError> {
    let deadline = Instant::now() + delay.min(MAX_DELAY);
    let key = {
      let mut state = self.shared.state.lock();
      if state.shutdown {
        return Err(TimerError::ShutDown);
      }
      state.queue.schedule(deadline, callback)
    };
    tracing::trace!(key = key.get(), delay_ms = delay.as_millis() as u64, "timer scheduled");
    self.shared.condvar.notify_all();
    Ok(key)
  }

  fn cancel(&self, key: TimerKey) -> bool {
    self.shared.state.lock().queue.cancel(key)
  }
}

impl Drop for ThreadTimer {
  fn drop(&mut self) {
    self.shutdown();
  }
}

impl TimerCore {
  fn run(&self) {
    let mut state = self.lock();
    loop {
      if state.shutdown {
        return;
      }
      let now = Instant::now();
      let due = state.queue.pop_expired(now);
      if !due.is_empty() {
        drop(state);
        for callback in due {
          if let Err(payload) = catch_unwind(AssertUnwindSafe(callback)) {
            tracing::warn!(panic = %panic_message(payload.as_ref()), "timer callback panicked");
          }
        }
        state = self.lock();
        continue;
      }
      state = match state.queue.next_deadline() {
        | Some(deadline) => {
          let timeout = deadline.saturating_duration_since(now);
          self.condvar.wait_timeout(state, timeout).unwrap_or_else(PoisonError::into_inner).0
        },
        | None => self.condvar.wait(state).unwrap_or_else(PoisonError::into_inner),
      };
    }
  }

  fn lock(&self) -> MutexGuard<'_, TimerState> {
    self.state.lock()
  }
}
