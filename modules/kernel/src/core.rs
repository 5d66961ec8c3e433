/// Error taxonomy shared by every component.
pub mod error;
/// Executor boundary and the inline executor.
pub mod executor;
/// One-shot multicast results.
pub mod futures;
/// Node groups sharing defaults and a joint completion.
pub mod group;
/// Pins fed by producers: scalar, const and permit inputs.
pub mod input;
/// Pins and the node firing state machine.
pub mod node;
/// Push, scalar and demand based streaming contracts.
pub mod protocol;
/// Timer boundary and the manual timer.
pub mod timing;
