use alloc::boxed::Box;

mod manual_timer;
mod timer;
mod timer_shared;

pub use manual_timer::ManualTimer;
pub use pinflow_utils_rs::core::time::TimerKey;
pub use timer::Timer;
pub use timer_shared::TimerShared;

/// Callback invoked once a scheduled delay elapses.
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;
