//! In-memory visibility capability for tests and headless hosts.
//!
//! [`RecordingCapability`] hands out observers that record every call into a
//! shared [`ObserverLog`] and lets callers fabricate the events a real
//! platform would deliver for the live subscription.

use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use veil_model::{ElementHandle, ObserverConfiguration};

use crate::visibility::{
    ObserverEntry, SubscriptionId, VisibilityCapability, VisibilityEvent,
    VisibilityObserver,
};

#[derive(Debug, Default)]
pub struct ObserverLog {
    /// Observers created through the capability.
    pub created: usize,
    /// Options each observer was created with.
    pub options: Vec<ObserverConfiguration>,
    /// Every `observe` call, in order.
    pub observed: Vec<(ElementHandle, SubscriptionId)>,
    /// Every `disconnect` call, including redundant ones.
    pub disconnects: usize,
    /// The observation currently live, if any.
    pub active: Option<(ElementHandle, SubscriptionId)>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingCapability {
    log: Rc<RefCell<ObserverLog>>,
}

impl RecordingCapability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Ref<'_, ObserverLog> {
        self.log.borrow()
    }

    /// Event for the live observation, or `None` when nothing is observed.
    pub fn event(&self, visible: bool) -> Option<VisibilityEvent> {
        let (target, subscription) = self.log.borrow().active?;
        Some(Self::event_for(target, subscription, visible))
    }

    /// Event for an arbitrary subscription, live or not.
    pub fn event_for(
        target: ElementHandle,
        subscription: SubscriptionId,
        visible: bool,
    ) -> VisibilityEvent {
        let entry = if visible {
            ObserverEntry::visible(1.0)
        } else {
            ObserverEntry::hidden()
        };
        VisibilityEvent {
            subscription,
            target,
            entry,
        }
    }
}

impl VisibilityCapability for RecordingCapability {
    fn create_observer(
        &self,
        options: &ObserverConfiguration,
    ) -> Option<Box<dyn VisibilityObserver>> {
        let mut log = self.log.borrow_mut();
        log.created += 1;
        log.options.push(options.clone());
        Some(Box::new(RecordingObserver {
            log: Rc::clone(&self.log),
        }))
    }
}

#[derive(Debug)]
struct RecordingObserver {
    log: Rc<RefCell<ObserverLog>>,
}

impl VisibilityObserver for RecordingObserver {
    fn observe(&mut self, target: ElementHandle, subscription: SubscriptionId) {
        let mut log = self.log.borrow_mut();
        log.observed.push((target, subscription));
        log.active = Some((target, subscription));
    }

    fn disconnect(&mut self) {
        let mut log = self.log.borrow_mut();
        log.disconnects += 1;
        log.active = None;
    }
}
