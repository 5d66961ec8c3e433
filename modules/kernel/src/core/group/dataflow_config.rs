use alloc::string::String;

use crate::core::{executor::ExecutorShared, node::ErrorSinkShared, timing::TimerShared};

/// Defaults shared by every node of a [`Dataflow`](super::Dataflow).
#[derive(Clone, Default)]
pub struct DataflowConfig {
  name:       Option<String>,
  executor:   Option<ExecutorShared>,
  timer:      Option<TimerShared>,
  error_sink: Option<ErrorSinkShared>,
}

impl DataflowConfig {
  /// Sets the group name.
  #[must_use]
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Sets the executor inherited by members without their own.
  #[must_use]
  pub fn with_executor(mut self, executor: ExecutorShared) -> Self {
    self.executor = Some(executor);
    self
  }

  /// Sets the timer inherited by members without their own.
  #[must_use]
  pub fn with_timer(mut self, timer: TimerShared) -> Self {
    self.timer = Some(timer);
    self
  }

  /// Sets the failure sink inherited by members without their own.
  #[must_use]
  pub fn with_error_sink(mut self, sink: ErrorSinkShared) -> Self {
    self.error_sink = Some(sink);
    self
  }

  /// Returns the group name.
  #[must_use]
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub(crate) const fn executor(&self) -> Option<&ExecutorShared> {
    self.executor.as_ref()
  }

  pub(crate) const fn timer(&self) -> Option<&TimerShared> {
    self.timer.as_ref()
  }

  pub(crate) const fn error_sink(&self) -> Option<&ErrorSinkShared> {
    self.error_sink.as_ref()
  }
}
