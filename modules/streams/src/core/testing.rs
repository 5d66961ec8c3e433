//! Test doubles shared by the unit tests of this crate.

use alloc::vec::Vec;

use pinflow_kernel_rs::core::{
  error::FlowError,
  protocol::{Subscriber, SubscriberShared, Subscription, SubscriptionShared},
};
use pinflow_utils_rs::core::sync::{ArcShared, SpinSyncMutex};

/// Signal observed by a [`RecordingSubscriber`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Observed<T> {
  Next(T),
  Error(FlowError),
  Complete,
}

/// Subscriber keeping every signal and its subscription.
pub(crate) struct RecordingSubscriber<T> {
  subscription: SpinSyncMutex<Option<SubscriptionShared>>,
  subscribed:   SpinSyncMutex<usize>,
  observed:     SpinSyncMutex<Vec<Observed<T>>>,
}

impl<T> RecordingSubscriber<T>
where
  T: Clone + Send + 'static,
{
  pub(crate) fn new() -> ArcShared<Self> {
    ArcShared::new(Self {
      subscription: SpinSyncMutex::new(None),
      subscribed:   SpinSyncMutex::new(0),
      observed:     SpinSyncMutex::new(Vec::new()),
    })
  }

  pub(crate) fn shared(this: &ArcShared<Self>) -> SubscriberShared<T> {
    this.clone().into_dyn(|recorder| recorder as &dyn Subscriber<T>)
  }

  pub(crate) fn request(&self, n: i64) {
    let subscription = self.subscription.lock().clone();
    subscription.expect("not subscribed").request(n);
  }

  pub(crate) fn cancel(&self) {
    let subscription = self.subscription.lock().clone();
    subscription.expect("not subscribed").cancel();
  }

  pub(crate) fn subscribed(&self) -> usize {
    *self.subscribed.lock()
  }

  pub(crate) fn observed(&self) -> Vec<Observed<T>> {
    self.observed.lock().clone()
  }

  pub(crate) fn tokens(&self) -> Vec<T> {
    self
      .observed
      .lock()
      .iter()
      .filter_map(|observed| match observed {
        | Observed::Next(token) => Some(token.clone()),
        | _ => None,
      })
      .collect()
  }

  pub(crate) fn terminal(&self) -> Option<Observed<T>> {
    self.observed.lock().iter().find(|observed| !matches!(observed, Observed::Next(_))).cloned()
  }
}

impl<T> Subscriber<T> for RecordingSubscriber<T>
where
  T: Send + 'static,
{
  fn on_subscribe(&self, subscription: SubscriptionShared) {
    *self.subscribed.lock() += 1;
    *self.subscription.lock() = Some(subscription);
  }

  fn on_next(&self, item: T) {
    self.observed.lock().push(Observed::Next(item));
  }

  fn on_error(&self, cause: FlowError) {
    self.observed.lock().push(Observed::Error(cause));
  }

  fn on_complete(&self) {
    self.observed.lock().push(Observed::Complete);
  }
}

/// Subscription recording the demand it receives.
#[derive(Default)]
pub(crate) struct ManualSubscription {
  requests:  SpinSyncMutex<Vec<i64>>,
  cancelled: SpinSyncMutex<bool>,
}

impl ManualSubscription {
  pub(crate) fn new() -> ArcShared<Self> {
    ArcShared::new(Self::default())
  }

  pub(crate) fn shared(this: &ArcShared<Self>) -> SubscriptionShared {
    this.clone().into_dyn(|subscription| subscription as &dyn Subscription)
  }

  pub(crate) fn requested(&self) -> i64 {
    self.requests.lock().iter().sum()
  }

  pub(crate) fn requests(&self) -> Vec<i64> {
    self.requests.lock().clone()
  }

  pub(crate) fn is_cancelled(&self) -> bool {
    *self.cancelled.lock()
  }
}

impl Subscription for ManualSubscription {
  fn request(&self, n: i64) {
    self.requests.lock().push(n);
  }

  fn cancel(&self) {
    *self.cancelled.lock() = true;
  }
}
