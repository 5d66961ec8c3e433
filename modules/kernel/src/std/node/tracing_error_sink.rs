//! `tracing` backed failure reporting.

extern crate std;


use crate::core::{
  error::FlowError,
  node::{ErrorSink, NodeId},
};

/// [`ErrorSink`] that emits every node failure as an `ERROR` event.
///
/// Cancellations are expected during shutdown and are reported at `DEBUG`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingErrorSink;

impl TracingErrorSink {
  /// Target name used in emitted events.
  pub const DEFAULT_TARGET: &'static str = "pinflow::node::failure";

  /// Creates a sink.
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl ErrorSink for TracingErrorSink {
  fn node_failed(&self, node: NodeId, name: &str, cause: &FlowError) {
    if cause.is_cancellation() {
      tracing::debug!(target: TracingErrorSink::DEFAULT_TARGET, node = %node, name, "node cancelled");
    } else {
      tracing::error!(target: TracingErrorSink::DEFAULT_TARGET, node = %node, name, cause = %cause, "node failed");
    }
  }
}
