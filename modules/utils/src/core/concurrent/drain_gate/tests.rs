use alloc::{collections::VecDeque, vec::Vec};
use core::cell::RefCell;

use super::DrainGate;

#[test]
fn only_one_owner_at_a_time() {
  let gate = DrainGate::new();
  assert!(gate.try_acquire());
  assert!(gate.is_draining());
  assert!(!gate.try_acquire());
  gate.release();
  assert!(gate.try_acquire());
}

#[test]
fn re_entrant_work_is_processed_by_the_owner() {
  let gate = DrainGate::new();
  let queue = RefCell::new(VecDeque::from([1_u32]));
  let seen = RefCell::new(Vec::new());

  let drained = gate.drain_with(
    || {
      loop {
        let Some(item) = queue.borrow_mut().pop_front() else {
          break;
        };
        seen.borrow_mut().push(item);
        if item < 3 {
          queue.borrow_mut().push_back(item + 1);
          // 再入呼び出しはオーナーに処理を委ねて即座に戻る
          let nested = gate.drain_with(|| unreachable!("nested caller must not drain"), || false);
          assert!(!nested);
        }
      }
    },
    || !queue.borrow().is_empty(),
  );

  assert!(drained);
  assert_eq!(*seen.borrow(), [1, 2, 3]);
  assert!(!gate.is_draining());
}

#[test]
fn pending_work_after_release_triggers_another_pass() {
  let gate = DrainGate::new();
  let passes = RefCell::new(0_u32);
  let pending = RefCell::new(2_u32);

  gate.drain_with(
    || *passes.borrow_mut() += 1,
    || {
      let mut left = pending.borrow_mut();
      if *left == 0 {
        return false;
      }
      *left -= 1;
      true
    },
  );

  assert_eq!(*passes.borrow(), 3);
}
