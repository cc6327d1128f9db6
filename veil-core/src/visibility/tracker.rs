//! Visibility tracker
//!
//! Owns the single platform observer used for one reveal, binds it to the
//! element the host attached, and folds platform events into a
//! [`VisibilitySignal`].
//!
//! Two modes exist:
//! - trigger-once: the first visible observation latches `is_visible` and
//!   the observer is disconnected immediately; later events are dropped.
//! - continuous: every event overwrites `is_visible` with the latest
//!   observation, so the signal can flip back to hidden.
//!
//! Without a platform capability the tracker reports visible from the
//! start, so content can never get stuck behind a missing observer.

use tokio::sync::watch;
use veil_model::{ElementHandle, ObserverConfiguration};

use super::capability::{
    ObserverEntry, SubscriptionId, VisibilityCapability, VisibilityEvent,
    VisibilityObserver,
};

/// What subscribers of a tracker observe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VisibilitySignal {
    pub is_visible: bool,
    pub ever_visible: bool,
    pub raw_event: Option<ObserverEntry>,
}

/// Tracker bookkeeping. `ever_visible` never resets once set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackerState {
    pub bound_element: Option<ElementHandle>,
    pub is_visible: bool,
    pub ever_visible: bool,
    pub last_event: Option<ObserverEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveObservation {
    subscription: SubscriptionId,
    target: ElementHandle,
}

#[derive(Debug)]
pub struct VisibilityTracker {
    trigger_once: bool,
    observer: Option<Box<dyn VisibilityObserver>>,
    active: Option<ActiveObservation>,
    next_subscription: u64,
    state: TrackerState,
    signal: watch::Sender<VisibilitySignal>,
    torn_down: bool,
}

impl VisibilityTracker {
    /// Create a tracker, asking `capability` for an observer.
    ///
    /// `None`, or a capability that declines to create an observer, puts the
    /// tracker in the always-visible fallback.
    pub fn new(
        capability: Option<&dyn VisibilityCapability>,
        options: &ObserverConfiguration,
        trigger_once: bool,
    ) -> Self {
        let observer =
            capability.and_then(|capability| capability.create_observer(options));

        let mut state = TrackerState::default();
        if observer.is_none() {
            log::info!(
                "visibility observation unavailable; treating element as visible"
            );
            state.is_visible = true;
            state.ever_visible = true;
            state.last_event = Some(ObserverEntry::assumed_visible());
        }

        let (signal, _) = watch::channel(Self::signal_from(&state));

        Self {
            trigger_once,
            observer,
            active: None,
            next_subscription: 0,
            state,
            signal,
            torn_down: false,
        }
    }

    /// Point the observer at `element`, releasing any previous observation
    /// first. `None` only releases.
    pub fn bind(&mut self, element: Option<ElementHandle>) {
        if self.torn_down {
            log::warn!("bind({element:?}) on a torn down visibility tracker");
            return;
        }

        if let Some(active) = self.active
            && Some(active.target) == element
        {
            return;
        }

        self.release();
        self.state.bound_element = element;

        let Some(target) = element else {
            log::debug!("visibility tracker unbound");
            return;
        };

        if self.trigger_once && self.state.ever_visible {
            // Latched: nothing left to observe.
            return;
        }

        let Some(observer) = self.observer.as_mut() else {
            return;
        };

        self.next_subscription += 1;
        let subscription = SubscriptionId::new(self.next_subscription);
        observer.observe(target, subscription);
        self.active = Some(ActiveObservation {
            subscription,
            target,
        });
        log::debug!("observing {target} as {subscription}");
    }

    /// Fold one platform event into the tracker.
    ///
    /// Returns `true` when the published signal changed. Events addressed to
    /// a released subscription are dropped.
    pub fn handle_event(&mut self, event: VisibilityEvent) -> bool {
        let is_current = self
            .active
            .is_some_and(|active| active.subscription == event.subscription);
        if self.torn_down || !is_current {
            log::debug!(
                "dropping stale visibility event for {} ({})",
                event.target,
                event.subscription
            );
            return false;
        }

        let before = self.current_signal();
        let entry = event.entry;

        if self.trigger_once {
            if !self.state.ever_visible {
                self.state.last_event = Some(entry);
                if entry.is_intersecting {
                    self.state.is_visible = true;
                    self.state.ever_visible = true;
                    log::debug!("{} became visible; latching", event.target);
                    self.release();
                }
            }
        } else {
            self.state.last_event = Some(entry);
            self.state.is_visible = entry.is_intersecting;
            if entry.is_intersecting {
                self.state.ever_visible = true;
            }
        }

        let after = self.current_signal();
        if after != before {
            self.signal.send_replace(after);
            true
        } else {
            false
        }
    }

    pub fn current_signal(&self) -> VisibilitySignal {
        Self::signal_from(&self.state)
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible
    }

    pub fn ever_visible(&self) -> bool {
        self.state.ever_visible
    }

    pub fn trigger_once(&self) -> bool {
        self.trigger_once
    }

    /// True while a platform observation is live.
    pub fn is_observing(&self) -> bool {
        self.active.is_some()
    }

    /// True when running on the always-visible fallback.
    pub fn is_fallback(&self) -> bool {
        self.observer.is_none()
    }

    /// Subscribe to signal changes.
    pub fn subscribe(&self) -> watch::Receiver<VisibilitySignal> {
        self.signal.subscribe()
    }

    /// Release the platform observation for good. Safe to call repeatedly
    /// and on trackers that were never bound.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.release();
        self.observer = None;
        self.torn_down = true;
        log::debug!("visibility tracker torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn release(&mut self) {
        if let Some(active) = self.active.take()
            && let Some(observer) = self.observer.as_mut()
        {
            observer.disconnect();
            log::debug!(
                "released observation of {} ({})",
                active.target,
                active.subscription
            );
        }
    }

    fn signal_from(state: &TrackerState) -> VisibilitySignal {
        VisibilitySignal {
            is_visible: state.is_visible,
            ever_visible: state.ever_visible,
            raw_event: state.last_event,
        }
    }
}

impl Drop for VisibilityTracker {
    fn drop(&mut self) {
        self.teardown();
    }
}
