//! Future adapter for [`Promise`].

#[cfg(test)]
mod tests;

use core::{
  future::Future,
  pin::Pin,
  task::{Context, Poll},
};

use super::Promise;
use crate::core::error::FlowError;

/// Future resolving to the outcome of a [`Promise`].
pub struct PromiseListener<T> {
  promise: Promise<T>,
}

impl<T> PromiseListener<T>
where
  T: Clone + Send + 'static,
{
  pub(super) const fn new(promise: Promise<T>) -> Self {
    Self { promise }
  }
}

impl<T> Clone for PromiseListener<T> {
  fn clone(&self) -> Self {
    Self { promise: self.promise.clone() }
  }
}

impl<T> Future for PromiseListener<T>
where
  T: Clone + Send + 'static,
{
  type Output = Result<T, FlowError>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    match self.promise.poll_outcome(cx.waker()) {
      | Some(outcome) => Poll::Ready(outcome),
      | None => Poll::Pending,
    }
  }
}

impl<T> Unpin for PromiseListener<T> {}
