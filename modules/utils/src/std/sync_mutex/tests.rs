extern crate std;

use std::{panic, sync::Arc, thread};

use super::StdSyncMutex;

#[test]
fn into_inner_returns_the_last_value() {
  let mutex = StdSyncMutex::new(0);
  *mutex.lock() = 77;
  assert_eq!(mutex.into_inner(), 77);
}

#[test]
fn poisoned_lock_still_yields_value() {
  let mutex = Arc::new(StdSyncMutex::new(5));
  let cloned = mutex.clone();
  let result = thread::spawn(move || {
    let _guard = cloned.lock();
    panic::panic_any("poison");
  })
  .join();
  assert!(result.is_err());
  assert!(mutex.is_poisoned());
  assert_eq!(*mutex.lock(), 5);
}
