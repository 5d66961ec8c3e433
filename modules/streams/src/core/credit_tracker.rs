//! Credit accounting for one subscription.


use pinflow_kernel_rs::core::error::ProtocolViolation;

/// Outstanding demand granted by a subscriber.
///
/// Credit only grows through [`grant`](Self::grant) and shrinks by one per delivered
/// token. A grant that would overflow, or a grant of `i64::MAX`, makes the credit
/// unbounded for the rest of the subscription.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CreditTracker {
  remaining: u64,
  unbounded: bool,
}

impl CreditTracker {
  /// Creates a tracker without credit.
  #[must_use]
  pub const fn new() -> Self {
    Self { remaining: 0, unbounded: false }
  }

  /// Adds `n` units of credit.
  ///
  /// Returns `true` when the subscription had no credit before, i.e. it just became
  /// able to receive.
  ///
  /// # Errors
  ///
  /// Returns [`ProtocolViolation::NonPositiveDemand`] when `n <= 0`.
  pub const fn grant(&mut self, n: i64) -> Result<bool, ProtocolViolation> {
    if n <= 0 {
      return Err(ProtocolViolation::NonPositiveDemand(n));
    }
    let was_idle = !self.has_credit();
    if n == i64::MAX {
      self.unbounded = true;
      return Ok(was_idle);
    }
    match self.remaining.checked_add(n as u64) {
      | Some(total) => self.remaining = total,
      | None => self.unbounded = true,
    }
    Ok(was_idle)
  }

  /// Uses one unit of credit. Returns `false` when none was left.
  pub const fn consume_one(&mut self) -> bool {
    if self.unbounded {
      return true;
    }
    if self.remaining == 0 {
      return false;
    }
    self.remaining -= 1;
    true
  }

  /// Returns `true` while at least one more token may be delivered.
  #[must_use]
  pub const fn has_credit(&self) -> bool {
    self.unbounded || self.remaining > 0
  }

  /// Returns the remaining credit, `None` when unbounded.
  #[must_use]
  pub const fn remaining(&self) -> Option<u64> {
    if self.unbounded { None } else { Some(self.remaining) }
  }
}
