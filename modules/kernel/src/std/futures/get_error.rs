use crate::core::error::FlowError;

/// Failure of a blocking promise read.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GetError {
  /// The promise failed with the contained cause.
  #[error("promise failed: {0}")]
  Failed(FlowError),
  /// The promise was cancelled.
  #[error("promise cancelled")]
  Cancelled,
  /// The wait timed out before the promise completed.
  #[error("timed out waiting for the promise")]
  Timeout,
}

impl From<FlowError> for GetError {
  fn from(cause: FlowError) -> Self {
    if cause.is_cancellation() { GetError::Cancelled } else { GetError::Failed(cause) }
  }
}
