use alloc::vec::Vec;

use super::BoundedQueue;
use crate::core::collections::{OverflowPolicy, QueueError};

#[test]
fn block_policy_rejects_when_full() {
  let mut queue = BoundedQueue::with_capacity(2, OverflowPolicy::Block);
  assert!(queue.offer(1).is_ok());
  assert!(queue.offer(2).is_ok());
  assert!(queue.is_full());
  assert_eq!(queue.offer(3), Err(QueueError::Full(3)));
  assert_eq!(queue.poll(), Some(1));
  assert_eq!(queue.remaining(), 1);
}

#[test]
fn grow_policy_extends_the_limit() {
  let mut queue = BoundedQueue::with_capacity(1, OverflowPolicy::Grow);
  for value in 0..5 {
    queue.offer(value).unwrap();
  }
  assert_eq!(queue.len(), 5);
  assert!(queue.capacity() >= 5);
  let drained: Vec<_> = queue.drain_all().collect();
  assert_eq!(drained, [0, 1, 2, 3, 4]);
}

#[test]
fn zero_capacity_is_raised_to_one() {
  let queue = BoundedQueue::<u8>::with_capacity(0, OverflowPolicy::Block);
  assert_eq!(queue.capacity(), 1);
}

#[test]
fn push_front_restores_head_even_when_full() {
  let mut queue = BoundedQueue::with_capacity(1, OverflowPolicy::Block);
  queue.offer("b").unwrap();
  queue.push_front("a");
  assert_eq!(queue.len(), 2);
  assert_eq!(queue.peek(), Some(&"a"));
  assert_eq!(queue.poll(), Some("a"));
  assert_eq!(queue.poll(), Some("b"));
  assert_eq!(queue.poll(), None);
}

#[test]
fn closed_queue_rejects_offers_but_keeps_items() {
  let mut queue = BoundedQueue::with_capacity(4, OverflowPolicy::Block);
  queue.offer(7).unwrap();
  queue.close();
  assert!(queue.is_closed());
  let err = queue.offer(8).unwrap_err();
  assert_eq!(err.into_item(), 8);
  assert_eq!(queue.poll(), Some(7));
}
