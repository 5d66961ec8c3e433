use alloc::string::String;

/// Failure returned by a node action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ActionError {
  message: String,
}

impl ActionError {
  /// Creates an error carrying `message`.
  #[must_use]
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }

  /// Returns the message.
  #[must_use]
  pub fn message(&self) -> &str {
    &self.message
  }
}

impl From<&str> for ActionError {
  fn from(message: &str) -> Self {
    Self::new(message)
  }
}

impl From<String> for ActionError {
  fn from(message: String) -> Self {
    Self { message }
  }
}
