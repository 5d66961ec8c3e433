use alloc::sync::Arc;

use super::ArcShared;

trait Describe {
  fn describe(&self) -> u32;
}

struct Token(u32);

impl Describe for Token {
  fn describe(&self) -> u32 {
    self.0 * 2
  }
}

#[test]
fn clones_share_identity() {
  let first = ArcShared::new(Token(1));
  let second = first.clone();
  assert_eq!(first, second);
  assert_eq!(first.strong_count(), 2);
}

#[test]
fn distinct_allocations_are_not_equal() {
  let first = ArcShared::new(Token(1));
  let second = ArcShared::new(Token(1));
  assert_ne!(first, second);
}

#[test]
fn into_dyn_keeps_the_allocation() {
  let concrete = ArcShared::new(Token(21));
  let keep = concrete.clone();
  let dynamic: ArcShared<dyn Describe> = concrete.into_dyn(|value| value as &dyn Describe);
  assert_eq!(dynamic.describe(), 42);
  assert_eq!(keep.strong_count(), 2);
  drop(dynamic);
  assert_eq!(keep.strong_count(), 1);
}

#[test]
fn from_arc_wraps_existing_handle() {
  let arc = Arc::new(5_u8);
  let shared = ArcShared::from_arc(arc.clone());
  assert_eq!(*shared, 5);
  assert_eq!(Arc::strong_count(&arc), 2);
}
