extern crate std;

use std::time::Duration;

use tokio::sync::oneshot;

use super::TokioExecutor;
use crate::core::{error::ExecuteError, executor::ExecutorShared};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn runs_tasks_on_the_runtime() {
  let executor = ExecutorShared::new(TokioExecutor::current().unwrap());
  let (sender, receiver) = oneshot::channel();

  executor.execute(move || sender.send(42).unwrap()).unwrap();

  let value = tokio::time::timeout(Duration::from_secs(5), receiver).await.unwrap().unwrap();
  assert_eq!(value, 42);
}

#[test]
fn current_fails_outside_a_runtime() {
  assert_eq!(TokioExecutor::current().err(), Some(ExecuteError::ExecutorUnavailable));
}
