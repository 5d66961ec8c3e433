use std::time::Duration;

use anyhow::Context;
use pinflow_kernel_rs::{
  core::{
    error::ActionError,
    executor::ExecutorShared,
    group::{Dataflow, DataflowConfig},
    node::NodeConfig,
    protocol::Publisher,
  },
  std::{
    executor::{ThreadPoolConfig, ThreadPoolExecutor},
    futures::PromiseBlockingExt,
  },
};
use pinflow_streams_rs::{
  core::{StreamInput, StreamInputConfig, StreamOutput, StreamOutputConfig},
  std::BlockingStreamQueue,
};

const COUNT: u64 = 10;

fn main() -> anyhow::Result<()> {
  let executor = ExecutorShared::new(ThreadPoolExecutor::new(ThreadPoolConfig::default().with_workers(2)));
  let dataflow = Dataflow::new(DataflowConfig::default().with_name("squares").with_executor(executor));

  let numbers = StreamOutput::<u64>::new(StreamOutputConfig::new(4).with_name("numbers"));
  let squares = StreamOutput::<u64>::new(StreamOutputConfig::new(4).with_name("squares"));

  let producer_builder = dataflow.node_builder(NodeConfig::default().with_name("producer"));
  numbers.with_room_pin(producer_builder.owner()).context("room pin for numbers")?;
  let producer = {
    let numbers = numbers.clone();
    let mut next = 0;
    producer_builder.build(move |ctx| {
      next += 1;
      if !numbers.offer(next) {
        return Err(ActionError::new("numbers buffer full"));
      }
      if next == COUNT {
        numbers.complete();
        ctx.stop();
      }
      Ok(())
    })
  };

  let squarer_builder = dataflow.node_builder(NodeConfig::default().with_name("squarer"));
  let input = StreamInput::<u64>::new(squarer_builder.owner(), StreamInputConfig::new(2)).context("stream input")?;
  squares.with_room_pin(squarer_builder.owner()).context("room pin for squares")?;
  let squarer = {
    let (input, squares) = (input.clone(), squares.clone());
    squarer_builder.build(move |ctx| {
      match input.take() {
        | Some(value) => {
          if !squares.offer(value * value) {
            return Err(ActionError::new("squares buffer full"));
          }
        },
        | None if input.is_completed() => {
          squares.complete();
          ctx.stop();
        },
        | None => {},
      }
      Ok(())
    })
  };
  numbers.subscribe(input.as_subscriber());

  let sink = BlockingStreamQueue::new(3);
  squares.subscribe(sink.as_subscriber());

  squarer.start().context("start squarer")?;
  producer.start().context("start producer")?;
  while let Some(square) = sink.take() {
    println!("{square}");
  }
  dataflow.completion().get_timeout(Duration::from_secs(5)).context("wait for dataflow")?;
  Ok(())
}
