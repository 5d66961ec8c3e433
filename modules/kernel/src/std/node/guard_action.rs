extern crate std;


use alloc::{format, string::String};
use core::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::core::{error::ActionError, node::NodeContext};

/// Wraps a node action so that a panic fails the node instead of unwinding through
/// the executor.
///
/// The panic message becomes the [`ActionError`] message, prefixed with
/// `action panicked: `.
pub fn guard_action<F>(mut action: F) -> impl FnMut(&mut NodeContext<'_>) -> Result<(), ActionError> + Send + 'static
where
  F: FnMut(&mut NodeContext<'_>) -> Result<(), ActionError> + Send + 'static, {
  move |context: &mut NodeContext<'_>| match catch_unwind(AssertUnwindSafe(|| action(context))) {
    | Ok(result) => result,
    | Err(payload) => Err(ActionError::new(format!("action panicked: {}", panic_message(payload.as_ref())))),
  }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    return String::from(*message);
  }
  if let Some(message) = payload.downcast_ref::<String>() {
    return message.clone();
  }
  String::from("non-string panic payload")
}
