mod std_signal;
mod sync_mutex;

pub use std_signal::StdSignal;
pub use sync_mutex::StdSyncMutex;
