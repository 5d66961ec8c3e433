/// Behaviour applied when a [`BoundedQueue`](super::BoundedQueue) reaches its limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
  /// Rejects the offer and hands the item back so the caller can back off.
  #[default]
  Block,
  /// Grows the underlying storage capacity.
  Grow,
}
