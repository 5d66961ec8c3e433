use super::SubscriptionShared;
use crate::core::error::FlowError;

/// Receiving side of the demand driven streaming contract.
///
/// Signals arrive serially: `on_subscribe` first, then at most as many `on_next` as
/// were requested, then at most one of `on_error` or `on_complete`.
pub trait Subscriber<T>: Send + Sync {
  /// Receives the subscription used to request items or cancel.
  fn on_subscribe(&self, subscription: SubscriptionShared);

  /// Receives the next item.
  fn on_next(&self, item: T);

  /// Receives the terminal failure.
  fn on_error(&self, cause: FlowError);

  /// Receives normal completion.
  fn on_complete(&self);
}
