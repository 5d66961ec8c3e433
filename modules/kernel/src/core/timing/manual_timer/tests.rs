use alloc::{boxed::Box, sync::Arc, vec::Vec};
use core::time::Duration;

use pinflow_utils_rs::core::sync::SpinSyncMutex;

use super::ManualTimer;
use crate::core::timing::{Timer, TimerShared};

#[test]
fn callbacks_wait_for_the_clock() {
  let timer = ManualTimer::new();
  let log = Arc::new(SpinSyncMutex::new(Vec::new()));
  let sink = log.clone();
  timer.schedule(Duration::from_millis(10), Box::new(move || sink.lock().push("fired"))).unwrap();

  assert_eq!(timer.advance(Duration::from_millis(9)), 0);
  assert!(log.lock().is_empty());
  assert_eq!(timer.advance(Duration::from_millis(1)), 1);
  assert_eq!(*log.lock(), ["fired"]);
  assert_eq!(timer.now(), Duration::from_millis(10));
}

#[test]
fn cancelled_callbacks_do_not_run() {
  let timer = TimerShared::new(ManualTimer::new());
  let key = timer.schedule(Duration::from_millis(1), || panic!("cancelled callback ran")).unwrap();
  assert!(timer.cancel(key));
  assert!(!timer.cancel(key));
}

#[test]
fn callbacks_scheduled_while_firing_run_when_due() {
  let timer = ManualTimer::new();
  let log = Arc::new(SpinSyncMutex::new(Vec::new()));
  let nested_timer = timer.clone();
  let sink = log.clone();
  timer
    .schedule(
      Duration::from_millis(5),
      Box::new(move || {
        sink.lock().push(1);
        let sink = sink.clone();
        nested_timer.schedule(Duration::ZERO, Box::new(move || sink.lock().push(2))).unwrap();
      }),
    )
    .unwrap();

  assert_eq!(timer.advance(Duration::from_millis(5)), 2);
  assert_eq!(*log.lock(), [1, 2]);
  assert_eq!(timer.pending(), 0);
}
