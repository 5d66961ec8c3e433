use alloc::string::String;


const DEFAULT_CAPACITY: usize = 16;

/// Settings of a [`StreamOutput`](super::StreamOutput).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamOutputConfig {
  capacity: usize,
  name:     Option<String>,
}

impl StreamOutputConfig {
  /// Creates a configuration buffering up to `capacity` tokens. Zero is raised to one.
  #[must_use]
  pub fn new(capacity: usize) -> Self {
    Self { capacity: capacity.max(1), name: None }
  }

  /// Updates the capacity. Zero is raised to one.
  #[must_use]
  pub fn with_capacity(mut self, capacity: usize) -> Self {
    self.capacity = capacity.max(1);
    self
  }

  /// Names the stream, for diagnostics.
  #[must_use]
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Returns the buffer capacity.
  #[must_use]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  /// Returns the stream name.
  #[must_use]
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

impl Default for StreamOutputConfig {
  fn default() -> Self {
    Self::new(DEFAULT_CAPACITY)
  }
}
