use alloc::string::ToString;

use super::FlowError;
use crate::core::error::{ActionError, ExecuteError, ProtocolViolation};

#[test]
fn cancellation_is_distinguished() {
  assert!(FlowError::Cancelled.is_cancellation());
  assert!(!FlowError::action("boom").is_cancellation());
}

#[test]
fn conversions_wrap_sources() {
  let from_violation: FlowError = ProtocolViolation::NonPositiveDemand(0).into();
  assert_eq!(from_violation, FlowError::Protocol(ProtocolViolation::NonPositiveDemand(0)));

  let from_action: FlowError = ActionError::from("bad input").into();
  assert_eq!(from_action.to_string(), "action failed: bad input");

  let from_execute: FlowError = ExecuteError::RejectedExecution.into();
  assert!(matches!(from_execute, FlowError::Execute(ExecuteError::RejectedExecution)));
}

#[test]
fn messages_are_readable() {
  assert_eq!(ProtocolViolation::NonPositiveDemand(-3).to_string(), "demand must be positive, got -3");
  assert_eq!(ProtocolViolation::TokenAlreadySet.to_string(), "token set already");
  assert_eq!(ProtocolViolation::BufferOverflow { capacity: 2 }.to_string(), "buffer overflow (capacity 2)");
}
