mod promise;
mod promise_listener;
mod promise_state;

pub use promise::Promise;
pub use promise_listener::PromiseListener;
