mod bounded_queue;
mod overflow_policy;
mod queue_error;

pub use bounded_queue::BoundedQueue;
pub use overflow_policy::OverflowPolicy;
pub use queue_error::QueueError;
