//! Change notification: per-node subscriptions and debounced delivery

mod debounce;
mod notifier;

pub use debounce::{Debouncer, DeferredTask, DEFAULT_QUIET_INTERVAL};
pub use notifier::{ChangeHandler, ChangeNotifier, Subscription, SubscriptionId, ValueChange};
