extern crate std;

#[cfg(test)]
mod tests;

use core::time::Duration;
use std::time::Instant;

use pinflow_utils_rs::{core::sync::ArcShared, std::StdSignal};

use super::GetError;
use crate::core::futures::Promise;

/// Blocking reads of a [`Promise`] for threads outside the dataflow.
///
/// Never call these from a node action: the action would hold its executor thread
/// while the value it waits for may need that same thread.
pub trait PromiseBlockingExt<T> {
  /// Blocks until the promise completes.
  ///
  /// # Errors
  ///
  /// Returns [`GetError::Failed`] or [`GetError::Cancelled`] for a failed promise.
  fn get(&self) -> Result<T, GetError>;

  /// Blocks until the promise completes or `timeout` elapses.
  ///
  /// # Errors
  ///
  /// Returns [`GetError::Timeout`] when the promise is still pending after `timeout`,
  /// otherwise the same errors as [`get`](Self::get).
  fn get_timeout(&self, timeout: Duration) -> Result<T, GetError>;
}

impl<T> PromiseBlockingExt<T> for Promise<T>
where
  T: Clone + Send + 'static,
{
  fn get(&self) -> Result<T, GetError> {
    wait(self, None)
  }

  fn get_timeout(&self, timeout: Duration) -> Result<T, GetError> {
    wait(self, Instant::now().checked_add(timeout))
  }
}

fn wait<T>(promise: &Promise<T>, deadline: Option<Instant>) -> Result<T, GetError>
where
  T: Clone + Send + 'static, {
  if let Some(outcome) = promise.try_get() {
    return outcome.map_err(GetError::from);
  }
  let signal = ArcShared::new(StdSignal::new());
  let mut observed = signal.generation();
  let key = {
    let signal = signal.clone();
    promise.when_complete_keyed(move |_| signal.notify_all())
  };
  loop {
    if let Some(outcome) = promise.try_get() {
      return outcome.map_err(GetError::from);
    }
    match deadline {
      | Some(deadline) => {
        if !signal.wait_for_change_until(observed, deadline) {
          if let Some(key) = key {
            promise.remove_waiter(key);
          }
          // 取り外す直前に完了した場合はその結果を返す
          return promise.try_get().map_or(Err(GetError::Timeout), |outcome| outcome.map_err(GetError::from));
        }
      },
      | None => signal.wait_for_change(observed),
    }
    observed = signal.generation();
  }
}
