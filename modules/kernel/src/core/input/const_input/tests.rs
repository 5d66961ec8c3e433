use alloc::{sync::Arc, vec::Vec};

use pinflow_utils_rs::core::sync::SpinSyncMutex;

use super::ConstInput;
use crate::core::{
  error::ProtocolViolation,
  executor::{ExecutorShared, InlineExecutor},
  input::ScalarInput,
  node::{AsyncProcBuilder, NodeConfig},
};

#[test]
fn value_is_retained_across_rounds() {
  let builder = AsyncProcBuilder::new(NodeConfig::default().with_executor(ExecutorShared::new(InlineExecutor::new())));
  let factor = ConstInput::<i64>::new(builder.owner()).unwrap();
  let x = ScalarInput::<i64>::new(builder.owner()).unwrap();
  let out = Arc::new(SpinSyncMutex::new(Vec::new()));
  let (factor_in, x_in, sink) = (factor.clone(), x.clone(), out.clone());
  let node = builder.build(move |_ctx| {
    sink.lock().push(factor_in.current().unwrap() * x_in.take().unwrap());
    Ok(())
  });
  node.start().unwrap();

  factor.post(3).unwrap();
  x.post(1).unwrap();
  x.post(2).unwrap();
  x.post(5).unwrap();

  assert_eq!(*out.lock(), [3, 6, 15]);
  assert!(!factor.pin().is_blocked());
  assert_eq!(factor.post(4), Err(ProtocolViolation::TokenAlreadySet));
}
