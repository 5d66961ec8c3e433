/// Thread, thread pool and tokio backed executors.
pub mod executor;
/// Blocking accessors for promises.
pub mod futures;
/// Failure reporting and panic containment for node actions.
pub mod node;
/// Thread and tokio backed timers.
pub mod timing;
