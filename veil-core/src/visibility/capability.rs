use std::fmt;

use veil_model::{ElementHandle, ObserverConfiguration};

/// Identifies one `observe` call made by a tracker.
///
/// Every bind allocates a fresh id. Platform events echo the id they were
/// produced for, which lets the tracker discard events from observations it
/// has already released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// A single observation reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverEntry {
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

impl ObserverEntry {
    pub const fn visible(intersection_ratio: f64) -> Self {
        Self {
            is_intersecting: true,
            intersection_ratio,
        }
    }

    pub const fn hidden() -> Self {
        Self {
            is_intersecting: false,
            intersection_ratio: 0.0,
        }
    }

    /// Entry synthesized when no platform capability exists.
    pub const fn assumed_visible() -> Self {
        Self::visible(1.0)
    }
}

/// A platform observation addressed to the subscription it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEvent {
    pub subscription: SubscriptionId,
    pub target: ElementHandle,
    pub entry: ObserverEntry,
}

/// One platform observer instance.
///
/// Implementations deliver [`VisibilityEvent`]s back to the host, which
/// forwards them to the tracker. `disconnect` stops every observation made
/// through this instance and must tolerate repeated calls.
pub trait VisibilityObserver: fmt::Debug {
    fn observe(&mut self, target: ElementHandle, subscription: SubscriptionId);

    fn disconnect(&mut self);
}

/// The platform's ability to create visibility observers.
///
/// Returning `None` means the running environment cannot observe visibility
/// at all (a non-interactive renderer, for instance).
pub trait VisibilityCapability {
    fn create_observer(
        &self,
        options: &ObserverConfiguration,
    ) -> Option<Box<dyn VisibilityObserver>>;
}

/// Capability for environments without any visibility observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl VisibilityCapability for Unsupported {
    fn create_observer(
        &self,
        _options: &ObserverConfiguration,
    ) -> Option<Box<dyn VisibilityObserver>> {
        None
    }
}
