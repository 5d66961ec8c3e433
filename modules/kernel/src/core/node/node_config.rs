use alloc::string::String;

use super::{ControlMode, ErrorSinkShared};
use crate::core::{executor::ExecutorShared, timing::TimerShared};

/// Per-node settings.
///
/// Unset executor, timer and error sink fall back to the enclosing dataflow's
/// defaults, and the executor finally to an inline executor.
#[derive(Clone, Default)]
pub struct NodeConfig {
  name:       Option<String>,
  executor:   Option<ExecutorShared>,
  timer:      Option<TimerShared>,
  error_sink: Option<ErrorSinkShared>,
  control:    ControlMode,
  daemon:     bool,
}

impl NodeConfig {
  /// Sets the name used in logs and failure reports.
  #[must_use]
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  /// Sets the executor.
  #[must_use]
  pub fn with_executor(mut self, executor: ExecutorShared) -> Self {
    self.executor = Some(executor);
    self
  }

  /// Sets the timer used by `awake_after`.
  #[must_use]
  pub fn with_timer(mut self, timer: TimerShared) -> Self {
    self.timer = Some(timer);
    self
  }

  /// Sets the failure sink.
  #[must_use]
  pub fn with_error_sink(mut self, sink: ErrorSinkShared) -> Self {
    self.error_sink = Some(sink);
    self
  }

  /// Sets the control mode.
  #[must_use]
  pub fn with_control(mut self, control: ControlMode) -> Self {
    self.control = control;
    self
  }

  /// Marks the node as a daemon: a dataflow completes without waiting for it.
  #[must_use]
  pub fn with_daemon(mut self, daemon: bool) -> Self {
    self.daemon = daemon;
    self
  }

  /// Returns the configured name.
  #[must_use]
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  /// Returns the configured executor.
  #[must_use]
  pub const fn executor(&self) -> Option<&ExecutorShared> {
    self.executor.as_ref()
  }

  /// Returns the configured timer.
  #[must_use]
  pub const fn timer(&self) -> Option<&TimerShared> {
    self.timer.as_ref()
  }

  /// Returns the configured failure sink.
  #[must_use]
  pub const fn error_sink(&self) -> Option<&ErrorSinkShared> {
    self.error_sink.as_ref()
  }

  /// Returns the control mode.
  #[must_use]
  pub const fn control(&self) -> ControlMode {
    self.control
  }

  /// Returns `true` for daemon nodes.
  #[must_use]
  pub const fn is_daemon(&self) -> bool {
    self.daemon
  }
}
