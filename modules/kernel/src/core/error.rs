mod action_error;
mod execute_error;
mod flow_error;
mod node_error;
mod protocol_violation;
mod timer_error;

pub use action_error::ActionError;
pub use execute_error::ExecuteError;
pub use flow_error::FlowError;
pub use node_error::NodeError;
pub use protocol_violation::ProtocolViolation;
pub use timer_error::TimerError;
