mod get_error;
mod promise_blocking_ext;

pub use get_error::GetError;
pub use promise_blocking_ext::PromiseBlockingExt;
