/// Bounded FIFO storage.
pub mod collections;
/// Cooperative draining helpers.
pub mod concurrent;
/// Synchronization primitives and shared ownership abstractions.
pub mod sync;
/// Deadline ordered storage for timers.
pub mod time;
