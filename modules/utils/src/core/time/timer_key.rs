/// Identifier of an entry scheduled in a [`TimerQueue`](super::TimerQueue).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerKey(u64);

impl TimerKey {
  /// Creates a key from its raw value.
  #[must_use]
  pub const fn new(raw: u64) -> Self {
    Self(raw)
  }

  /// Returns the raw value.
  #[must_use]
  pub const fn get(self) -> u64 {
    self.0
  }
}
