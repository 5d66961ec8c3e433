/// Settings of a [`StreamInput`](super::StreamInput).
///
/// The pin never has more tokens queued plus requested than `capacity`. On subscribe it
/// requests `initial_request` tokens, which defaults to the full capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamInputConfig {
  capacity:        usize,
  initial_request: Option<usize>,
}

impl StreamInputConfig {
  /// Creates a configuration queueing up to `capacity` tokens. Zero is raised to one.
  #[must_use]
  pub fn new(capacity: usize) -> Self {
    Self { capacity: capacity.max(1), initial_request: None }
  }

  /// Sets the demand requested on subscribe, clamped to the capacity.
  #[must_use]
  pub const fn with_initial_request(mut self, initial_request: usize) -> Self {
    self.initial_request = Some(initial_request);
    self
  }

  /// Returns the queue capacity.
  #[must_use]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  /// Returns the demand requested on subscribe.
  #[must_use]
  pub fn initial_request(&self) -> usize {
    self.initial_request.map_or(self.capacity, |requested| requested.min(self.capacity))
  }
}

impl Default for StreamInputConfig {
  fn default() -> Self {
    Self::new(16)
  }
}
