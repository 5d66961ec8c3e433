use pinflow_utils_rs::core::sync::ArcShared;

use super::BufferSignal;

/// Observer of buffer occupancy transitions.
///
/// Signals arrive in the order the transitions happened, never while the publisher
/// lock is held, so a listener may call back into the publisher.
pub trait BufferListener: Send + Sync {
  /// Called on every transition.
  fn on_signal(&self, signal: BufferSignal);
}

/// Shared handle to a [`BufferListener`].
pub type BufferListenerShared = ArcShared<dyn BufferListener>;
