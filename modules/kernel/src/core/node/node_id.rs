use core::{fmt, sync::atomic::Ordering};

use portable_atomic::AtomicU64;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique node identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
  pub(crate) fn next() -> Self {
    Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
  }

  /// Returns the raw value.
  #[must_use]
  pub const fn get(self) -> u64 {
    self.0
  }
}

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "node-{}", self.0)
  }
}
