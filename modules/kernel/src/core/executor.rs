use alloc::boxed::Box;

mod executor_shared;
mod inline_executor;
mod task_executor;

pub use executor_shared::ExecutorShared;
pub use inline_executor::InlineExecutor;
pub use task_executor::TaskExecutor;

/// Unit of work accepted by a [`TaskExecutor`].
pub type ExecutorTask = Box<dyn FnOnce() + Send + 'static>;
