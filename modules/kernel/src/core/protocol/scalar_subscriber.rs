use crate::core::error::FlowError;

/// Receiver of exactly one value or failure.
pub trait ScalarSubscriber<T>: Send + Sync {
  /// Receives the value.
  fn on_success(&self, value: T);

  /// Receives the failure.
  fn on_error(&self, cause: FlowError);
}
