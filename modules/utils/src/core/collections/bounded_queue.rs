use alloc::collections::VecDeque;
use core::cmp;

use super::{OverflowPolicy, QueueError};

#[cfg(test)]
mod tests;

/// FIFO backed by [`VecDeque`] with an explicit capacity limit.
///
/// `offer` respects the limit according to the [`OverflowPolicy`]. `push_front` does
/// not: it is reserved for handing an item back to the head of the queue (a pushed
/// back token, or one reclaimed from a cancelled hand-off) and may exceed the limit.
pub struct BoundedQueue<T> {
  buffer: VecDeque<T>,
  limit:  usize,
  policy: OverflowPolicy,
  closed: bool,
}

impl<T> BoundedQueue<T> {
  /// Creates a queue with the specified capacity limit and overflow policy.
  ///
  /// A zero capacity is raised to one.
  #[must_use]
  pub fn with_capacity(capacity: usize, policy: OverflowPolicy) -> Self {
    let limit = cmp::max(capacity, 1);
    Self { buffer: VecDeque::with_capacity(limit), limit, policy, closed: false }
  }

  /// Creates a queue that grows on demand.
  #[must_use]
  pub fn unbounded() -> Self {
    Self::with_capacity(8, OverflowPolicy::Grow)
  }

  /// Appends an item at the tail.
  ///
  /// # Errors
  ///
  /// Returns [`QueueError::Closed`] once [`close`](Self::close) was called and
  /// [`QueueError::Full`] when the limit is reached under [`OverflowPolicy::Block`].
  pub fn offer(&mut self, item: T) -> Result<(), QueueError<T>> {
    if self.closed {
      return Err(QueueError::Closed(item));
    }
    if self.is_full() {
      match self.policy {
        | OverflowPolicy::Block => return Err(QueueError::Full(item)),
        | OverflowPolicy::Grow => {
          self.limit = cmp::max(self.limit.saturating_mul(2), self.buffer.len().saturating_add(1));
        },
      }
    }
    self.buffer.push_back(item);
    Ok(())
  }

  /// Removes the oldest item.
  pub fn poll(&mut self) -> Option<T> {
    self.buffer.pop_front()
  }

  /// Puts an item back at the head, ignoring the limit.
  pub fn push_front(&mut self, item: T) {
    self.buffer.push_front(item);
  }

  /// Returns the oldest item without removing it.
  #[must_use]
  pub fn peek(&self) -> Option<&T> {
    self.buffer.front()
  }

  /// Returns the number of stored items.
  #[must_use]
  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  /// Returns `true` when no item is stored.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  /// Returns the configured capacity limit.
  #[must_use]
  pub const fn capacity(&self) -> usize {
    self.limit
  }

  /// Returns the number of items that can still be offered.
  #[must_use]
  pub fn remaining(&self) -> usize {
    self.limit.saturating_sub(self.buffer.len())
  }

  /// Returns `true` when the limit is reached.
  #[must_use]
  pub fn is_full(&self) -> bool {
    self.buffer.len() >= self.limit
  }

  /// Rejects further offers. Stored items remain available to `poll`.
  pub const fn close(&mut self) {
    self.closed = true;
  }

  /// Returns `true` once [`close`](Self::close) was called.
  #[must_use]
  pub const fn is_closed(&self) -> bool {
    self.closed
  }

  /// Removes and returns every stored item, oldest first.
  pub fn drain_all(&mut self) -> impl Iterator<Item = T> + '_ {
    self.buffer.drain(..)
  }
}
