extern crate std;

use alloc::{sync::Arc, vec::Vec};
use core::sync::atomic::{AtomicUsize, Ordering};
use std::{sync::mpsc, thread, time::Duration};

use super::ThreadPoolExecutor;
use crate::{
  core::{
    error::ExecuteError,
    executor::{ExecutorShared, TaskExecutor},
  },
  std::executor::ThreadPoolConfig,
};

#[test]
fn runs_submitted_tasks_on_named_workers() {
  let pool = ThreadPoolExecutor::new(ThreadPoolConfig::default().with_workers(2).with_name_prefix("test-pool"));
  assert_eq!(pool.worker_count(), 2);
  let (sender, receiver) = mpsc::channel();

  for _ in 0..8 {
    let sender = sender.clone();
    pool
      .submit(alloc::boxed::Box::new(move || {
        let name = thread::current().name().map(alloc::string::ToString::to_string);
        sender.send(name).unwrap();
      }))
      .unwrap();
  }

  let names: Vec<_> = (0..8).map(|_| receiver.recv_timeout(Duration::from_secs(5)).unwrap()).collect();
  assert!(names.iter().all(|name| name.as_deref().is_some_and(|name| name.starts_with("test-pool-"))));
}

#[test]
fn panicking_task_does_not_kill_the_worker() {
  let pool = ExecutorShared::new(ThreadPoolExecutor::new(ThreadPoolConfig::default().with_workers(1)));
  let (sender, receiver) = mpsc::channel();

  pool.execute(|| panic!("boom")).unwrap();
  pool.execute(move || sender.send(7).unwrap()).unwrap();

  assert_eq!(receiver.recv_timeout(Duration::from_secs(5)).unwrap(), 7);
}

#[test]
fn shutdown_drains_queue_then_rejects() {
  let pool = ThreadPoolExecutor::new(ThreadPoolConfig::default().with_workers(1));
  let counter = Arc::new(AtomicUsize::new(0));
  for _ in 0..16 {
    let counter = counter.clone();
    pool
      .submit(alloc::boxed::Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
      }))
      .unwrap();
  }

  pool.shutdown();

  assert_eq!(counter.load(Ordering::SeqCst), 16);
  assert_eq!(pool.worker_count(), 0);
  assert_eq!(pool.submit(alloc::boxed::Box::new(|| {})), Err(ExecuteError::ExecutorUnavailable));
}

#[test]
fn bounded_queue_rejects_when_full() {
  let pool = ThreadPoolExecutor::new(ThreadPoolConfig::default().with_workers(1).with_queue_capacity(1));
  let (release, gate) = mpsc::channel::<()>();
  let (started_tx, started) = mpsc::channel::<()>();
  pool
    .submit(alloc::boxed::Box::new(move || {
      started_tx.send(()).unwrap();
      gate.recv().unwrap();
    }))
    .unwrap();
  started.recv_timeout(Duration::from_secs(5)).unwrap();

  // ワーカーはブロック中なので 1 件だけキューに入る
  pool.submit(alloc::boxed::Box::new(|| {})).unwrap();
  assert_eq!(pool.submit(alloc::boxed::Box::new(|| {})), Err(ExecuteError::RejectedExecution));

  release.send(()).unwrap();
}
