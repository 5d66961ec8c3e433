/// Demand and cancellation handle given to a [`Subscriber`](super::Subscriber).
pub trait Subscription: Send + Sync {
  /// Grants `n` more items.
  ///
  /// A non-positive `n` is a protocol violation reported through the subscriber's
  /// `on_error`, never as a panic at the call site.
  fn request(&self, n: i64);

  /// Stops all further signals. Idempotent.
  fn cancel(&self);
}
