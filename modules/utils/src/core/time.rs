mod timer_key;
mod timer_queue;

pub use timer_key::TimerKey;
pub use timer_queue::TimerQueue;
