#![deny(missing_docs)]
#![deny(clippy::must_use_candidate)]
#![cfg_attr(not(test), no_std)]

//! Dataflow kernel with pin-triggered nodes.
//!
//! A node ([`kernel::core::node::AsyncProc`]) owns input pins and runs its action once
//! every pin is unblocked. Pins come in four flavours: scalar and const inputs, permits
//! and demand driven streams. Outputs are one-shot [`kernel::core::futures::Promise`]s
//! and bounded [`streams::core::StreamOutput`]s that apply credit based backpressure.
//!
//! This crate only re-exports the member crates:
//!
//! - [`utils`]: shared handles, mutexes, bounded queues and timer queues
//! - [`kernel`]: nodes, pins, promises, executors and timers
//! - [`streams`]: stream publishers and stream input pins

#[cfg(test)]
mod tests;

pub use pinflow_kernel_rs as kernel;
pub use pinflow_streams_rs as streams;
pub use pinflow_utils_rs as utils;

/// Returns the package version.
#[must_use]
pub const fn crate_version() -> &'static str {
  env!("CARGO_PKG_VERSION")
}

/// Returns a one line summary of the enabled runtime support.
#[must_use]
pub const fn readiness_message() -> &'static str {
  if cfg!(feature = "tokio-executor") {
    "pinflow ready: thread pool, threaded and tokio executors"
  } else if cfg!(feature = "std") {
    "pinflow ready: thread pool and threaded executors"
  } else {
    "pinflow ready: bring your own executor"
  }
}
