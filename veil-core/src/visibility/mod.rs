//! Visibility tracking on top of a platform observer capability.

pub mod capability;
pub mod tracker;

pub use capability::{
    ObserverEntry, SubscriptionId, Unsupported, VisibilityCapability,
    VisibilityEvent, VisibilityObserver,
};
pub use tracker::{TrackerState, VisibilitySignal, VisibilityTracker};
