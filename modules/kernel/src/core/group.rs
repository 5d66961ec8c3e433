mod dataflow;
mod dataflow_config;
mod dataflow_core;

pub use dataflow::Dataflow;
pub use dataflow_config::DataflowConfig;
pub(crate) use dataflow_core::DataflowCore;
