use std::time::Duration;

use anyhow::Context;
use pinflow_kernel_rs::{
  core::{
    error::ActionError,
    executor::ExecutorShared,
    futures::Promise,
    group::{Dataflow, DataflowConfig},
    input::ScalarInput,
    node::{ControlMode, ErrorSink, NodeConfig},
  },
  std::{
    executor::{ThreadPoolConfig, ThreadPoolExecutor},
    futures::PromiseBlockingExt,
    node::TracingErrorSink,
  },
};
use pinflow_utils_rs::core::sync::ArcShared;

fn main() -> anyhow::Result<()> {
  let executor = ExecutorShared::new(ThreadPoolExecutor::new(ThreadPoolConfig::default().with_workers(2)));
  let sink = ArcShared::new(TracingErrorSink::new()).into_dyn(|sink| sink as &dyn ErrorSink);
  let dataflow =
    Dataflow::new(DataflowConfig::default().with_name("sum-square").with_executor(executor).with_error_sink(sink));

  let builder = dataflow.node_builder(NodeConfig::default().with_name("sum").with_control(ControlMode::Once));
  let a = ScalarInput::<i64>::new(builder.owner()).context("register a")?;
  let b = ScalarInput::<i64>::new(builder.owner()).context("register b")?;
  let sum = Promise::<i64>::new();
  let node = {
    let (a, b, sum) = (a.clone(), b.clone(), sum.clone());
    builder.build(move |_ctx| {
      let left = a.take().ok_or_else(|| ActionError::new("a missing"))?;
      let right = b.take().ok_or_else(|| ActionError::new("b missing"))?;
      sum.complete(left + right);
      Ok(())
    })
  };
  let square = sum.then_apply(|value| Ok(value * value));

  node.start().context("start sum node")?;
  a.post(3).context("post a")?;
  b.post(4).context("post b")?;

  let result = square.get_timeout(Duration::from_secs(5)).context("wait for square")?;
  println!("(3 + 4)^2 = {result}");
  dataflow.completion().get_timeout(Duration::from_secs(5)).context("wait for dataflow")?;
  Ok(())
}
