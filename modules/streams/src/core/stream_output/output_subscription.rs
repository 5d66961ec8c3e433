use pinflow_kernel_rs::core::protocol::Subscription;
use pinflow_utils_rs::core::sync::ArcShared;

use super::{OutputCore, output_state::SubscriptionId};

/// Subscription handle given to subscribers of a [`StreamOutput`](super::StreamOutput).
pub(super) struct OutputSubscription<T> {
  id:   SubscriptionId,
  core: ArcShared<OutputCore<T>>,
}

impl<T> OutputSubscription<T> {
  pub(super) const fn new(id: SubscriptionId, core: ArcShared<OutputCore<T>>) -> Self {
    Self { id, core }
  }
}

impl<T> Subscription for OutputSubscription<T>
where
  T: Send + 'static,
{
  fn request(&self, n: i64) {
    self.core.with_state(|state| state.request(self.id, n));
  }

  fn cancel(&self) {
    self.core.with_state(|state| state.cancel(self.id));
  }
}
