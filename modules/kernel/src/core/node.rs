use alloc::boxed::Box;

use pinflow_utils_rs::core::sync::ArcShared;

use crate::core::error::ActionError;

mod activation;
mod async_proc;
mod async_proc_builder;
mod control_mode;
mod error_sink;
mod node_config;
mod node_context;
mod node_core;
mod node_defaults;
mod node_id;
mod node_owner;
mod node_phase;
mod node_state;
mod pin;
mod pin_id;
mod pin_purge;

pub use activation::Activation;
pub use async_proc::AsyncProc;
pub use async_proc_builder::AsyncProcBuilder;
pub use control_mode::ControlMode;
pub use error_sink::ErrorSink;
pub use node_config::NodeConfig;
pub use node_context::NodeContext;
pub(crate) use node_core::NodeCore;
pub(crate) use node_defaults::NodeDefaults;
pub use node_id::NodeId;
pub use node_owner::NodeOwner;
pub use node_phase::NodePhase;
pub use pin::Pin;
pub use pin_id::PinId;
pub use pin_purge::PinPurge;

/// User action run each time a node fires.
pub type NodeAction = Box<dyn FnMut(&mut NodeContext<'_>) -> Result<(), ActionError> + Send + 'static>;
/// Shared handle to an [`ErrorSink`].
pub type ErrorSinkShared = ArcShared<dyn ErrorSink>;
/// Shared handle to a [`PinPurge`].
pub type PinPurgeShared = ArcShared<dyn PinPurge>;
