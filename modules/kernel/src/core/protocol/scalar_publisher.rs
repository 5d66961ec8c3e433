use super::ScalarSubscriberShared;

/// Source of a single value or failure.
pub trait ScalarPublisher<T> {
  /// Attaches `subscriber`. If the outcome is already known it is delivered at once.
  fn subscribe_scalar(&self, subscriber: ScalarSubscriberShared<T>);
}
