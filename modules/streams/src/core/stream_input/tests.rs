use alloc::{vec, vec::Vec};

use pinflow_kernel_rs::core::{
  error::{FlowError, ProtocolViolation},
  executor::{ExecutorShared, InlineExecutor},
  node::{AsyncProcBuilder, NodeConfig, NodePhase},
  protocol::{Publisher, Subscriber},
};
use pinflow_utils_rs::core::sync::{ArcShared, SpinSyncMutex};

use super::StreamInput;
use crate::core::{StreamInputConfig, StreamOutput, testing::ManualSubscription};

fn builder() -> AsyncProcBuilder {
  AsyncProcBuilder::new(NodeConfig::default().with_executor(ExecutorShared::new(InlineExecutor::new())))
}

#[test]
fn subscribe_requests_the_initial_demand_once() {
  let builder = builder();
  let input = StreamInput::<u32>::new(builder.owner(), StreamInputConfig::new(4).with_initial_request(3)).unwrap();
  let first = ManualSubscription::new();
  let second = ManualSubscription::new();

  input.on_subscribe(ManualSubscription::shared(&first));
  input.on_subscribe(ManualSubscription::shared(&second));

  assert_eq!(first.requests(), vec![3]);
  assert!(!first.is_cancelled());
  assert!(second.is_cancelled());
  assert!(second.requests().is_empty());
}

#[test]
fn each_run_consumes_one_token_and_replenishes_demand() {
  let builder = builder();
  let input = StreamInput::<u32>::new(builder.owner(), StreamInputConfig::new(2)).unwrap();
  let seen = ArcShared::new(SpinSyncMutex::new(Vec::new()));
  let node = {
    let (input, seen) = (input.clone(), seen.clone());
    builder.build(move |_ctx| {
      seen.lock().push(input.current());
      Ok(())
    })
  };
  let upstream = ManualSubscription::new();
  input.on_subscribe(ManualSubscription::shared(&upstream));
  assert!(input.pin().is_blocked());

  input.on_next(10);
  input.on_next(20);
  assert_eq!(input.len(), 2);
  node.start().unwrap();

  assert_eq!(*seen.lock(), vec![Some(10), Some(20)]);
  assert!(input.is_empty());
  assert!(input.pin().is_blocked());
  assert_eq!(upstream.requested(), 4);
}

#[test]
fn closed_stream_still_delivers_buffered_tokens_before_completion() {
  let builder = builder();
  let input = StreamInput::<u32>::new(builder.owner(), StreamInputConfig::new(4)).unwrap();
  let seen = ArcShared::new(SpinSyncMutex::new(Vec::new()));
  let node = {
    let (input, seen) = (input.clone(), seen.clone());
    builder.build(move |ctx| {
      if input.is_completed() {
        ctx.stop();
      } else {
        seen.lock().push(input.take());
      }
      Ok(())
    })
  };
  input.on_subscribe(ManualSubscription::shared(&ManualSubscription::new()));
  input.on_next(1);
  input.on_next(2);
  input.on_complete();
  assert!(input.is_closed());
  assert!(!input.is_completed());

  node.start().unwrap();

  assert_eq!(*seen.lock(), vec![Some(1), Some(2)]);
  assert_eq!(node.phase(), NodePhase::Stopped);
  assert_eq!(input.cause(), None);
}

#[test]
fn completion_is_reported_to_a_single_run() {
  let builder = builder();
  let input = StreamInput::<u32>::new(builder.owner(), StreamInputConfig::default()).unwrap();
  let runs = ArcShared::new(SpinSyncMutex::new(0_usize));
  let node = {
    let runs = runs.clone();
    builder.build(move |_ctx| {
      *runs.lock() += 1;
      Ok(())
    })
  };
  node.start().unwrap();

  input.on_error(FlowError::action("upstream broke"));

  assert_eq!(*runs.lock(), 1);
  assert!(input.pin().is_blocked());
  assert!(input.is_completed());
  assert_eq!(input.cause(), Some(FlowError::action("upstream broke")));
  assert_eq!(node.phase(), NodePhase::Armed);
}

#[test]
fn push_back_keeps_the_head_for_the_next_round() {
  let builder = builder();
  let input = StreamInput::<u32>::new(builder.owner(), StreamInputConfig::new(2)).unwrap();
  let seen = ArcShared::new(SpinSyncMutex::new(Vec::new()));
  let node = {
    let (input, seen) = (input.clone(), seen.clone());
    builder.build(move |_ctx| {
      let mut seen = seen.lock();
      seen.push(input.current());
      if seen.len() == 1 {
        input.push_back();
      }
      Ok(())
    })
  };
  input.on_subscribe(ManualSubscription::shared(&ManualSubscription::new()));
  input.on_next(7);

  node.start().unwrap();

  assert_eq!(*seen.lock(), vec![Some(7), Some(7)]);
  assert!(input.is_empty());
}

#[test]
fn tokens_beyond_the_requested_demand_close_the_pin() {
  let builder = builder();
  let input = StreamInput::<u32>::new(builder.owner(), StreamInputConfig::new(1)).unwrap();
  let _node = builder.build(|_ctx| Ok(()));
  let upstream = ManualSubscription::new();
  input.on_subscribe(ManualSubscription::shared(&upstream));

  input.on_next(1);
  input.on_next(2);

  assert!(upstream.is_cancelled());
  assert_eq!(input.cause(), Some(FlowError::Protocol(ProtocolViolation::DemandExceeded)));
  assert_eq!(input.take(), Some(1));
  assert!(input.is_completed());
}

#[test]
fn cancel_stops_the_upstream_and_closes() {
  let builder = builder();
  let input = StreamInput::<u32>::new(builder.owner(), StreamInputConfig::new(2)).unwrap();
  let _node = builder.build(|_ctx| Ok(()));
  let upstream = ManualSubscription::new();
  input.on_subscribe(ManualSubscription::shared(&upstream));

  input.cancel();
  input.on_next(5);

  assert!(upstream.is_cancelled());
  assert!(input.is_completed());
  assert!(input.is_empty());
}

#[test]
fn pulls_from_a_stream_output_within_its_capacity() {
  let output = StreamOutput::<u32>::with_capacity(8);
  let builder = builder();
  let input = StreamInput::<u32>::new(builder.owner(), StreamInputConfig::new(2)).unwrap();
  let seen = ArcShared::new(SpinSyncMutex::new(Vec::new()));
  let node = {
    let (input, seen) = (input.clone(), seen.clone());
    builder.build(move |ctx| {
      match input.take() {
        | Some(token) => seen.lock().push(token),
        | None if input.is_completed() => ctx.stop(),
        | None => {},
      }
      Ok(())
    })
  };
  output.subscribe(input.as_subscriber());
  for token in 1..=5 {
    assert!(output.offer(token));
  }
  output.complete();
  assert!(input.len() <= 2);

  node.start().unwrap();

  assert_eq!(*seen.lock(), vec![1, 2, 3, 4, 5]);
  assert_eq!(node.phase(), NodePhase::Stopped);
  assert!(output.is_terminated());
}
