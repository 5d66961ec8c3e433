/// Misuse of a pin, publisher or promise contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolViolation {
  /// `request` was called with zero or a negative amount.
  #[error("demand must be positive, got {0}")]
  NonPositiveDemand(i64),
  /// The target is closed, completed or owned by a terminated node.
  #[error("target is closed")]
  Closed,
  /// A single-token pin already holds a token.
  #[error("token set already")]
  TokenAlreadySet,
  /// The buffer is full.
  #[error("buffer overflow (capacity {capacity})")]
  BufferOverflow {
    /// Configured capacity.
    capacity: usize,
  },
  /// A publisher delivered more items than were requested.
  #[error("more items delivered than requested")]
  DemandExceeded,
}
