use alloc::{sync::Arc, vec::Vec};

use pinflow_utils_rs::core::sync::SpinSyncMutex;

use super::ScalarInput;
use crate::core::{
  error::{FlowError, ProtocolViolation},
  executor::{ExecutorShared, InlineExecutor},
  futures::Promise,
  node::{AsyncProcBuilder, NodeConfig, NodePhase},
  protocol::{Port, ScalarPublisher},
};

fn builder() -> AsyncProcBuilder {
  AsyncProcBuilder::new(NodeConfig::default().with_executor(ExecutorShared::new(InlineExecutor::new())))
}

#[test]
fn second_post_before_the_run_is_rejected() {
  let builder = builder();
  let a = ScalarInput::<u8>::new(builder.owner()).unwrap();
  let _b = ScalarInput::<u8>::new(builder.owner()).unwrap();
  let node = builder.build(|_ctx| Ok(()));
  node.start().unwrap();

  a.post(1).unwrap();
  assert!(!a.pin().is_blocked());
  assert_eq!(Port::post(&a, 2), Err(ProtocolViolation::TokenAlreadySet));
  assert_eq!(a.current(), Some(1));
}

#[test]
fn untaken_token_is_cleared_after_the_run() {
  let builder = builder();
  let a = ScalarInput::<u8>::new(builder.owner()).unwrap();
  let node = builder.build(|_ctx| Ok(()));
  node.start().unwrap();

  a.post(9).unwrap();
  assert!(!a.has_token());
  assert!(a.pin().is_blocked());
}

#[test]
fn pushed_back_token_survives_into_the_next_round() {
  let builder = builder();
  let a = ScalarInput::<u8>::new(builder.owner()).unwrap();
  let b = ScalarInput::<u8>::new(builder.owner()).unwrap();
  let seen = Arc::new(SpinSyncMutex::new(Vec::new()));
  let (left, right, sink) = (a.clone(), b.clone(), seen.clone());
  let node = builder.build(move |_ctx| {
    let value = left.current().unwrap();
    sink.lock().push((value, right.take().unwrap()));
    left.push_back();
    Ok(())
  });
  node.start().unwrap();

  a.post(1).unwrap();
  b.post(10).unwrap();
  b.post(20).unwrap();

  assert_eq!(*seen.lock(), [(1, 10), (1, 20)]);
  assert!(a.has_token());
  assert_eq!(node.phase(), NodePhase::Armed);
}

#[test]
fn feeding_from_a_failed_promise_fails_the_node() {
  let builder = builder();
  let a = ScalarInput::<u8>::new(builder.owner()).unwrap();
  let node = builder.build(|_ctx| Ok(()));
  node.start().unwrap();

  let source = Promise::<u8>::new();
  source.subscribe_scalar(a.as_scalar_subscriber());
  source.complete_exceptionally(FlowError::action("upstream"));

  assert_eq!(node.phase(), NodePhase::Failed);
  assert_eq!(node.completion().try_get(), Some(Err(FlowError::action("upstream"))));
}
