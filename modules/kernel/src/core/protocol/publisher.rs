use super::SubscriberShared;

/// Source of a demand driven token stream.
pub trait Publisher<T> {
  /// Attaches `subscriber`. It receives `on_subscribe` before any other signal.
  fn subscribe(&self, subscriber: SubscriberShared<T>);
}
