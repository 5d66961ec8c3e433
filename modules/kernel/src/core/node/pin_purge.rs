/// Post-run hook of an input.
///
/// Called after every successful run, without any lock held. The input consumes or
/// advances its token and re-blocks or keeps its pin unblocked for the next round.
pub trait PinPurge: Send + Sync {
  /// Consumes the token of the finished round.
  fn purge(&self);
}
