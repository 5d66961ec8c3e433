#![cfg(feature = "std")]

use std::{
  sync::{
    Arc, Barrier,
    atomic::{AtomicUsize, Ordering},
  },
  thread,
  time::Duration,
};

use pinflow_kernel_rs::{
  core::{error::FlowError, executor::ExecutorShared, futures::Promise},
  std::{
    executor::{ThreadPoolConfig, ThreadPoolExecutor},
    futures::PromiseBlockingExt,
  },
};

#[test]
fn racing_completions_have_a_single_winner() {
  let executor = ExecutorShared::new(ThreadPoolExecutor::new(ThreadPoolConfig::default().with_workers(2)));
  let promise = Promise::<usize>::with_executor(executor);
  let notified = Arc::new(AtomicUsize::new(0));
  for _ in 0..16 {
    let notified = notified.clone();
    promise.when_complete(move |_| {
      notified.fetch_add(1, Ordering::SeqCst);
    });
  }

  let barrier = Arc::new(Barrier::new(8));
  let racers: Vec<_> = (0..8)
    .map(|index| {
      let promise = promise.clone();
      let barrier = barrier.clone();
      thread::spawn(move || {
        barrier.wait();
        if index % 2 == 0 { promise.complete(index) } else { promise.complete_exceptionally(FlowError::Cancelled) }
      })
    })
    .collect();
  let winners = racers.into_iter().map(|racer| racer.join().unwrap()).filter(|won| *won).count();

  assert_eq!(winners, 1);
  let outcome = promise.try_get().unwrap();
  match outcome {
    | Ok(value) => assert_eq!(value % 2, 0),
    | Err(cause) => assert!(cause.is_cancellation()),
  }

  // 遅れて登録した待機者も一度だけ通知される
  let late = notified.clone();
  promise.when_complete(move |_| {
    late.fetch_add(1, Ordering::SeqCst);
  });
  let deadline = std::time::Instant::now() + Duration::from_secs(5);
  while notified.load(Ordering::SeqCst) < 17 && std::time::Instant::now() < deadline {
    thread::sleep(Duration::from_millis(1));
  }
  thread::sleep(Duration::from_millis(20));
  assert_eq!(notified.load(Ordering::SeqCst), 17);
}

#[test]
fn blocking_readers_on_many_threads_see_the_same_value() {
  let promise = Promise::<String>::new();
  let readers: Vec<_> = (0..4)
    .map(|_| {
      let promise = promise.clone();
      thread::spawn(move || promise.get_timeout(Duration::from_secs(5)))
    })
    .collect();

  thread::sleep(Duration::from_millis(10));
  assert!(promise.complete(String::from("ready")));

  for reader in readers {
    assert_eq!(reader.join().unwrap(), Ok(String::from("ready")));
  }
}
