mod thread_pool_config;
mod thread_pool_executor;
mod threaded_executor;
#[cfg(feature = "tokio-executor")]
mod tokio_executor;

pub use thread_pool_config::ThreadPoolConfig;
pub use thread_pool_executor::ThreadPoolExecutor;
pub use threaded_executor::ThreadedExecutor;
#[cfg(feature = "tokio-executor")]
pub use tokio_executor::TokioExecutor;
