use pinflow_utils_rs::core::sync::ArcShared;

mod port;
mod publisher;
mod scalar_publisher;
mod scalar_subscriber;
mod subscriber;
mod subscription;

pub use port::Port;
pub use publisher::Publisher;
pub use scalar_publisher::ScalarPublisher;
pub use scalar_subscriber::ScalarSubscriber;
pub use subscriber::Subscriber;
pub use subscription::Subscription;

/// Shared handle to a [`Subscription`].
pub type SubscriptionShared = ArcShared<dyn Subscription>;
/// Shared handle to a [`Subscriber`].
pub type SubscriberShared<T> = ArcShared<dyn Subscriber<T>>;
/// Shared handle to a [`ScalarSubscriber`].
pub type ScalarSubscriberShared<T> = ArcShared<dyn ScalarSubscriber<T>>;
