use alloc::{boxed::Box, vec::Vec};
use core::task::Waker;

use crate::core::{error::FlowError, protocol::ScalarSubscriberShared};

pub(super) type PromiseCallback<T> = Box<dyn FnOnce(Result<T, FlowError>) + Send + 'static>;

pub(super) enum PromiseState<T> {
  Pending(Vec<PromiseWaiter<T>>),
  Done(Result<T, FlowError>),
}

pub(super) enum PromiseWaiter<T> {
  Subscriber(ScalarSubscriberShared<T>),
  Callback(PromiseCallback<T>),
  Keyed(WaiterKey, PromiseCallback<T>),
  Waker(Waker),
}

/// Handle of a waiter that can be withdrawn before the promise completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WaiterKey(pub(super) usize);

impl<T> PromiseWaiter<T> {
  pub(super) fn notify(self, outcome: Result<T, FlowError>) {
    match self {
      | PromiseWaiter::Subscriber(subscriber) => match outcome {
        | Ok(value) => subscriber.on_success(value),
        | Err(cause) => subscriber.on_error(cause),
      },
      | PromiseWaiter::Callback(callback) | PromiseWaiter::Keyed(_, callback) => callback(outcome),
      | PromiseWaiter::Waker(waker) => waker.wake(),
    }
  }
}
