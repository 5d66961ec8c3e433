#![cfg(feature = "std")]

use std::{
  sync::{
    Arc,
    atomic::{AtomicU64, AtomicUsize, Ordering},
  },
  thread,
  time::Duration,
};

use pinflow_kernel_rs::{
  core::{
    error::{ActionError, ProtocolViolation},
    executor::ExecutorShared,
    input::ScalarInput,
    node::{AsyncProcBuilder, NodeConfig},
  },
  std::{
    executor::{ThreadPoolConfig, ThreadPoolExecutor},
    futures::PromiseBlockingExt,
  },
};

const ROUNDS: u64 = 500;

fn post_all(input: ScalarInput<u64>) -> thread::JoinHandle<()> {
  thread::spawn(move || {
    for value in 1..=ROUNDS {
      loop {
        match input.post(value) {
          | Ok(()) => break,
          | Err(ProtocolViolation::TokenAlreadySet) => thread::yield_now(),
          | Err(other) => panic!("unexpected violation: {other}"),
        }
      }
    }
  })
}

#[test]
fn every_pair_of_tokens_fires_exactly_once_on_a_pool() {
  let executor = ExecutorShared::new(ThreadPoolExecutor::new(ThreadPoolConfig::default().with_workers(4)));
  let builder = AsyncProcBuilder::new(NodeConfig::default().with_name("adder").with_executor(executor));
  let left = ScalarInput::<u64>::new(builder.owner()).unwrap();
  let right = ScalarInput::<u64>::new(builder.owner()).unwrap();
  let runs = Arc::new(AtomicUsize::new(0));
  let total = Arc::new(AtomicU64::new(0));
  let concurrent = Arc::new(AtomicUsize::new(0));

  let node = {
    let (left, right) = (left.clone(), right.clone());
    let (runs, total, concurrent) = (runs.clone(), total.clone(), concurrent.clone());
    builder.build(move |ctx| {
      assert_eq!(concurrent.fetch_add(1, Ordering::SeqCst), 0, "runs overlapped");
      let a = left.take().ok_or_else(|| ActionError::new("left token missing"))?;
      let b = right.take().ok_or_else(|| ActionError::new("right token missing"))?;
      assert_eq!(a, b, "tokens paired out of order");
      total.fetch_add(a + b, Ordering::SeqCst);
      if runs.fetch_add(1, Ordering::SeqCst) + 1 == ROUNDS as usize {
        ctx.stop();
      }
      concurrent.fetch_sub(1, Ordering::SeqCst);
      Ok(())
    })
  };
  node.start().unwrap();

  let producers = [post_all(left), post_all(right)];
  node.completion().get_timeout(Duration::from_secs(30)).unwrap();
  for producer in producers {
    producer.join().unwrap();
  }

  assert_eq!(runs.load(Ordering::SeqCst), ROUNDS as usize);
  assert_eq!(total.load(Ordering::SeqCst), ROUNDS * (ROUNDS + 1));
}
