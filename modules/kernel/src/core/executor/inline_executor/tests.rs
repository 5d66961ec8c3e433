use alloc::{boxed::Box, sync::Arc, vec::Vec};

use pinflow_utils_rs::core::sync::SpinSyncMutex;

use super::InlineExecutor;
use crate::core::executor::{ExecutorShared, TaskExecutor};

#[test]
fn runs_task_before_submit_returns() {
  let executor = InlineExecutor::new();
  let log = Arc::new(SpinSyncMutex::new(Vec::new()));
  let sink = log.clone();
  executor.submit(Box::new(move || sink.lock().push(1))).unwrap();
  assert_eq!(*log.lock(), [1]);
  assert_eq!(executor.pending(), 0);
}

#[test]
fn nested_submissions_run_after_the_current_task() {
  let executor = ExecutorShared::new(InlineExecutor::new());
  let log = Arc::new(SpinSyncMutex::new(Vec::new()));

  let outer_log = log.clone();
  let nested_executor = executor.clone();
  executor
    .execute(move || {
      outer_log.lock().push("outer:start");
      let inner_log = outer_log.clone();
      nested_executor.execute(move || inner_log.lock().push("inner")).unwrap();
      // ネストした投入は現在のタスク完了後に実行される
      outer_log.lock().push("outer:end");
    })
    .unwrap();

  assert_eq!(*log.lock(), ["outer:start", "outer:end", "inner"]);
}
