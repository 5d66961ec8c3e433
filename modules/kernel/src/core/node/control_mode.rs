/// How the control pin behaves after the node starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlMode {
  /// The control pin stays unblocked; the node fires whenever its data pins are ready.
  #[default]
  Persistent,
  /// Each firing consumes the control token; `awake` must be called for the next round.
  PerRun,
  /// The node runs once and then stops.
  Once,
}

impl ControlMode {
  pub(crate) const fn consumes_token(self) -> bool {
    matches!(self, ControlMode::PerRun | ControlMode::Once)
  }
}
