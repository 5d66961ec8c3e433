use pinflow_utils_rs::core::sync::ArcShared;

use super::ErrorSinkShared;
use crate::core::{executor::ExecutorShared, group::DataflowCore, timing::TimerShared};

/// Settings inherited from an enclosing dataflow.
#[derive(Clone, Default)]
pub(crate) struct NodeDefaults {
  pub(crate) executor:   Option<ExecutorShared>,
  pub(crate) timer:      Option<TimerShared>,
  pub(crate) error_sink: Option<ErrorSinkShared>,
  pub(crate) group:      Option<ArcShared<DataflowCore>>,
}
