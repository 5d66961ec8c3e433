use super::NodeId;
use crate::core::error::FlowError;

/// Receives node failures.
///
/// A failure always lands in the node's completion promise; a sink additionally
/// surfaces it, for instance to a log.
pub trait ErrorSink: Send + Sync {
  /// Called once when node `node` fails with `cause`.
  fn node_failed(&self, node: NodeId, name: &str, cause: &FlowError);
}
