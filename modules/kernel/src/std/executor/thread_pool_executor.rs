extern crate std;

#[cfg(test)]
mod tests;

use alloc::{format, vec::Vec};
use std::{
  panic::{AssertUnwindSafe, catch_unwind},
  thread::{self, JoinHandle},
};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use pinflow_utils_rs::std::StdSyncMutex;

use super::ThreadPoolConfig;
use crate::{
  core::{
    error::ExecuteError,
    executor::{ExecutorTask, TaskExecutor},
  },
  std::node::panic_message,
};

/// Fixed set of worker threads draining a shared task channel.
///
/// A panicking task is logged and the worker keeps running. Dropping the pool, or
/// calling [`shutdown`](Self::shutdown), lets the workers finish the queued tasks and
/// exit.
pub struct ThreadPoolExecutor {
  sender:  StdSyncMutex<Option<Sender<ExecutorTask>>>,
  workers: StdSyncMutex<Vec<JoinHandle<()>>>,
}

impl ThreadPoolExecutor {
  /// Spawns the workers described by `config`.
  ///
  /// Workers that the OS refuses to spawn are skipped; a pool left without any
  /// worker rejects every submission.
  #[must_use]
  pub fn new(config: ThreadPoolConfig) -> Self {
    let (sender, receiver) = match config.queue_capacity() {
      | Some(capacity) => crossbeam_channel::bounded(capacity),
      | None => crossbeam_channel::unbounded(),
    };
    let mut workers = Vec::with_capacity(config.workers());
    for index in 0..config.workers() {
      let receiver = receiver.clone();
      let spawned = thread::Builder::new()
        .name(format!("{}-{index}", config.name_prefix()))
        .spawn(move || worker_loop(&receiver));
      match spawned {
        | Ok(handle) => workers.push(handle),
        | Err(error) => tracing::warn!(worker = index, %error, "failed to spawn pool worker"),
      }
    }
    tracing::debug!(workers = workers.len(), prefix = config.name_prefix(), "thread pool started");
    let sender = if workers.is_empty() { None } else { Some(sender) };
    Self { sender: StdSyncMutex::new(sender), workers: StdSyncMutex::new(workers) }
  }

  /// Returns the number of running workers.
  #[must_use]
  pub fn worker_count(&self) -> usize {
    self.workers.lock().len()
  }

  /// Stops accepting tasks and waits for the workers to drain the queue.
  ///
  /// Called from a worker, that worker is not waited for.
  pub fn shutdown(&self) {
    let sender = self.sender.lock().take();
    if sender.is_none() {
      return;
    }
    drop(sender);
    let workers: Vec<JoinHandle<()>> = self.workers.lock().drain(..).collect();
    let current = thread::current().id();
    for worker in workers {
      if worker.thread().id() == current {
        continue;
      }
      if worker.join().is_err() {
        tracing::warn!("pool worker terminated abnormally");
      }
    }
    tracing::debug!("thread pool shut down");
  }
}

impl TaskExecutor for ThreadPoolExecutor {
  fn submit(&self, task: ExecutorTask) -> Result<(), ExecuteError> {
    let Some(sender) = self.sender.lock().clone() else {
      return Err(ExecuteError::ExecutorUnavailable);
    };
    sender.try_send(task).map_err(|error| match error {
      | TrySendError::Full(_) => ExecuteError::RejectedExecution,
      | TrySendError::Disconnected(_) => ExecuteError::ExecutorUnavailable,
    })
  }
}

impl Drop for ThreadPoolExecutor {
  fn drop(&mut self) {
    self.shutdown();
  }
}

fn worker_loop(receiver: &Receiver<ExecutorTask>) {
  for task in receiver.iter() {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(task)) {
      tracing::error!(panic = %panic_message(payload.as_ref()), "pool task panicked");
    }
  }
}
