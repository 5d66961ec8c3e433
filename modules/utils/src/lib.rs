#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::missing_safety_doc)]
#![cfg_attr(not(test), deny(clippy::redundant_clone))]
#![deny(clippy::redundant_field_names)]
#![deny(clippy::needless_borrow)]
#![deny(clippy::manual_let_else)]
#![deny(clippy::unnecessary_wraps)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::missing_const_for_fn)]
#![deny(clippy::must_use_candidate)]
#![deny(clippy::len_without_is_empty)]
#![deny(clippy::wrong_self_convention)]
#![cfg_attr(not(test), no_std)]

//! Low level building blocks shared by the pinflow crates.
//!
//! The `core` module is `no_std` + `alloc` and contains the shared handle, the spin
//! based mutex abstraction, a bounded FIFO, the drain-ownership gate used to serialize
//! callbacks without holding locks, and a deadline queue. The `std` module adds
//! poison-tolerant mutexes and a condvar signal for blocking facades.

extern crate alloc;

/// `no_std` primitives.
pub mod core;
/// Primitives backed by the standard library.
#[cfg(feature = "std")]
pub mod std;
