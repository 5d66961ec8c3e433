use alloc::{sync::Arc, task::Wake};
use core::{
  future::Future,
  pin::Pin,
  sync::atomic::{AtomicUsize, Ordering},
  task::{Context, Poll, Waker},
};

use crate::core::{error::FlowError, futures::Promise};

struct CountingWaker {
  wakes: AtomicUsize,
}

impl Wake for CountingWaker {
  fn wake(self: Arc<Self>) {
    self.wakes.fetch_add(1, Ordering::SeqCst);
  }
}

#[test]
fn resolves_after_completion_and_wakes_once() {
  let promise = Promise::<u32>::new();
  let mut listener = promise.listener();
  let counter = Arc::new(CountingWaker { wakes: AtomicUsize::new(0) });
  let waker = Waker::from(counter.clone());
  let mut cx = Context::from_waker(&waker);

  assert_eq!(Pin::new(&mut listener).poll(&mut cx), Poll::Pending);
  assert_eq!(Pin::new(&mut listener).poll(&mut cx), Poll::Pending);

  promise.complete(3);
  assert_eq!(counter.wakes.load(Ordering::SeqCst), 1);
  assert_eq!(Pin::new(&mut listener).poll(&mut cx), Poll::Ready(Ok(3)));
}

#[test]
fn failed_promise_resolves_with_the_cause() {
  let promise = Promise::<u32>::failed(FlowError::Cancelled);
  let mut listener = promise.listener();
  let mut cx = Context::from_waker(Waker::noop());
  assert_eq!(Pin::new(&mut listener).poll(&mut cx), Poll::Ready(Err(FlowError::Cancelled)));
}
