mod thread_timer;
#[cfg(feature = "tokio-executor")]
mod tokio_timer;

pub use thread_timer::ThreadTimer;
#[cfg(feature = "tokio-executor")]
pub use tokio_timer::TokioTimer;
