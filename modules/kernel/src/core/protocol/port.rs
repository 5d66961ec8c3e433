use crate::core::error::ProtocolViolation;

/// Fire-and-forget single token delivery.
pub trait Port<T> {
  /// Delivers `token`.
  ///
  /// # Errors
  ///
  /// Returns a [`ProtocolViolation`] when the target cannot accept the token, for
  /// example because it already holds one or has been closed.
  fn post(&self, token: T) -> Result<(), ProtocolViolation>;
}
