use alloc::sync::Arc;
use core::sync::atomic::{AtomicUsize, Ordering};

use super::PermitInput;
use crate::core::{
  executor::{ExecutorShared, InlineExecutor},
  input::ScalarInput,
  node::{AsyncProcBuilder, NodeConfig},
};

#[test]
fn each_run_consumes_one_permit() {
  let builder = AsyncProcBuilder::new(NodeConfig::default().with_executor(ExecutorShared::new(InlineExecutor::new())));
  let permits = PermitInput::new(builder.owner(), 2).unwrap();
  let job = ScalarInput::<u8>::new(builder.owner()).unwrap();
  let runs = Arc::new(AtomicUsize::new(0));
  let (input, counter) = (job.clone(), runs.clone());
  let node = builder.build(move |_ctx| {
    let _ = input.take();
    counter.fetch_add(1, Ordering::SeqCst);
    Ok(())
  });
  node.start().unwrap();

  job.post(1).unwrap();
  job.post(2).unwrap();
  assert_eq!(runs.load(Ordering::SeqCst), 2);
  assert_eq!(permits.permits(), 0);

  job.post(3).unwrap();
  assert_eq!(runs.load(Ordering::SeqCst), 2);
  permits.release(1).unwrap();
  assert_eq!(runs.load(Ordering::SeqCst), 3);
}

#[test]
fn zero_initial_permits_start_blocked() {
  let builder = AsyncProcBuilder::new(NodeConfig::default());
  let permits = PermitInput::new(builder.owner(), 0).unwrap();
  assert!(permits.pin().is_blocked());
  permits.release(0).unwrap();
  assert!(permits.pin().is_blocked());
}
