/// Buffer occupancy observers.
mod buffer_listener;
/// Buffer occupancy transitions.
mod buffer_signal;
/// Per subscription credit accounting.
mod credit_tracker;
/// Queue backed stream pin.
mod stream_input;
/// Stream pin configuration.
mod stream_input_config;
/// Bounded multi-subscriber publisher.
mod stream_output;
/// Publisher configuration.
mod stream_output_config;

pub use buffer_listener::{BufferListener, BufferListenerShared};
pub use buffer_signal::BufferSignal;
pub use credit_tracker::CreditTracker;
pub use stream_input::StreamInput;
pub use stream_input_config::StreamInputConfig;
pub use stream_output::StreamOutput;
pub use stream_output_config::StreamOutputConfig;

#[cfg(test)]
pub(crate) mod testing;
