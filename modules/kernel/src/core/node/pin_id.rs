/// Index of a pin within its owning node.
///
/// Pin `0` is the node's control pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinId(usize);

impl PinId {
  /// The control pin gating `start`, `awake` and `stop`.
  pub const CONTROL: PinId = PinId(0);

  pub(crate) const fn new(index: usize) -> Self {
    Self(index)
  }

  /// Returns the index.
  #[must_use]
  pub const fn index(self) -> usize {
    self.0
  }
}
