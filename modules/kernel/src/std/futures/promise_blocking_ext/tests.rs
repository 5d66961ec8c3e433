extern crate std;

use core::time::Duration;
use std::thread;

use super::PromiseBlockingExt;
use crate::{
  core::{error::FlowError, futures::Promise},
  std::futures::GetError,
};

#[test]
fn get_returns_an_already_fixed_value() {
  assert_eq!(Promise::completed(5_u32).get(), Ok(5));
}

#[test]
fn get_blocks_until_another_thread_completes() {
  let promise = Promise::<u32>::new();
  let completer = promise.clone();
  let handle = thread::spawn(move || {
    thread::sleep(Duration::from_millis(20));
    completer.complete(11);
  });

  assert_eq!(promise.get(), Ok(11));
  handle.join().unwrap();
}

#[test]
fn failures_and_cancellation_are_distinguished() {
  let failed = Promise::<u32>::failed(FlowError::action("broken"));
  assert_eq!(failed.get(), Err(GetError::Failed(FlowError::action("broken"))));

  let cancelled = Promise::<u32>::new();
  cancelled.cancel();
  assert_eq!(cancelled.get_timeout(Duration::from_millis(10)), Err(GetError::Cancelled));
}

#[test]
fn get_timeout_gives_up_on_a_pending_promise() {
  let promise = Promise::<u32>::new();
  assert_eq!(promise.get_timeout(Duration::from_millis(20)), Err(GetError::Timeout));

  promise.complete(3);
  assert_eq!(promise.get_timeout(Duration::from_millis(20)), Ok(3));
}

#[test]
fn repeated_timeouts_leave_no_waiter_behind() {
  let promise = Promise::<u32>::new();
  for _ in 0..5 {
    assert_eq!(promise.get_timeout(Duration::from_millis(2)), Err(GetError::Timeout));
    assert_eq!(promise.waiter_count(), 0);
  }

  promise.when_complete(|_| {});
  assert_eq!(promise.get_timeout(Duration::from_millis(2)), Err(GetError::Timeout));
  assert_eq!(promise.waiter_count(), 1);
}
