mod blocking_stream_queue;

pub use blocking_stream_queue::BlockingStreamQueue;
