//! Deadline ordered storage shared by the manual and threaded timers.

use alloc::{
  collections::{BTreeSet, BinaryHeap},
  vec::Vec,
};
use core::cmp::{Ordering, Reverse};

use super::TimerKey;


/// Min-heap of payloads keyed by deadline, FIFO among equal deadlines.
///
/// `D` is whatever clock the owner uses: a virtual [`core::time::Duration`] offset
/// for manual timers, an `Instant` for threaded ones.
pub struct TimerQueue<D, P> {
  heap:     BinaryHeap<Reverse<Scheduled<D, P>>>,
  live:     BTreeSet<TimerKey>,
  next_key: u64,
  sequence: u64,
}

impl<D: Ord + Copy, P> TimerQueue<D, P> {
  /// Creates an empty queue.
  #[must_use]
  pub const fn new() -> Self {
    Self { heap: BinaryHeap::new(), live: BTreeSet::new(), next_key: 0, sequence: 0 }
  }

  /// Returns the number of entries that are neither fired nor cancelled.
  #[must_use]
  pub fn len(&self) -> usize {
    self.live.len()
  }

  /// Returns `true` when no live entry remains.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.live.is_empty()
  }

  /// Schedules `payload` to expire at `deadline`.
  pub fn schedule(&mut self, deadline: D, payload: P) -> TimerKey {
    let key = TimerKey::new(self.next_key);
    self.next_key = self.next_key.wrapping_add(1);
    let sequence = self.sequence;
    self.sequence = self.sequence.wrapping_add(1);
    self.heap.push(Reverse(Scheduled { deadline, sequence, key, payload }));
    self.live.insert(key);
    key
  }

  /// Cancels a pending entry. Returns `false` if it already fired or was cancelled.
  pub fn cancel(&mut self, key: TimerKey) -> bool {
    self.live.remove(&key)
  }

  /// Returns the earliest live deadline, discarding cancelled heads.
  pub fn next_deadline(&mut self) -> Option<D> {
    while let Some(Reverse(head)) = self.heap.peek() {
      if self.live.contains(&head.key) {
        return Some(head.deadline);
      }
      self.heap.pop();
    }
    None
  }

  /// Removes every live entry whose deadline is at or before `now`, earliest first.
  pub fn pop_expired(&mut self, now: D) -> Vec<P> {
    let mut expired = Vec::new();
    while let Some(Reverse(head)) = self.heap.peek() {
      if head.deadline > now {
        break;
      }
      let Some(Reverse(entry)) = self.heap.pop() else {
        break;
      };
      if self.live.remove(&entry.key) {
        expired.push(entry.payload);
      }
    }
    expired
  }
}

impl<D: Ord + Copy, P> Default for TimerQueue<D, P> {
  fn default() -> Self {
    Self::new()
  }
}

struct Scheduled<D, P> {
  deadline: D,
  sequence: u64,
  key:      TimerKey,
  payload:  P,
}

impl<D: Ord, P> PartialEq for Scheduled<D, P> {
  fn eq(&self, other: &Self) -> bool {
    self.deadline == other.deadline && self.sequence == other.sequence
  }
}

impl<D: Ord, P> Eq for Scheduled<D, P> {}

impl<D: Ord, P> PartialOrd for Scheduled<D, P> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<D: Ord, P> Ord for Scheduled<D, P> {
  fn cmp(&self, other: &Self) -> Ordering {
    self.deadline.cmp(&other.deadline).then_with(|| self.sequence.cmp(&other.sequence))
  }
}
