mod guard_action;
mod tracing_error_sink;

pub use guard_action::guard_action;
pub(crate) use guard_action::panic_message;
pub use tracing_error_sink::TracingErrorSink;
