use core::fmt;

/// Errors returned by [`BoundedQueue::offer`](super::BoundedQueue::offer).
///
/// The rejected item is handed back to the caller.
#[derive(Clone, PartialEq, Eq)]
pub enum QueueError<T> {
  /// The queue is at capacity.
  Full(T),
  /// The queue was closed and accepts no more items.
  Closed(T),
}

impl<T> QueueError<T> {
  /// Returns the rejected item.
  pub fn into_item(self) -> T {
    match self {
      | QueueError::Full(item) | QueueError::Closed(item) => item,
    }
  }
}

impl<T> fmt::Debug for QueueError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | QueueError::Full(_) => f.write_str("QueueError::Full(..)"),
      | QueueError::Closed(_) => f.write_str("QueueError::Closed(..)"),
    }
  }
}

impl<T> fmt::Display for QueueError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      | QueueError::Full(_) => f.write_str("queue is full"),
      | QueueError::Closed(_) => f.write_str("queue is closed"),
    }
  }
}
