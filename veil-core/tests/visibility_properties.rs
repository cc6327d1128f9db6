//! Property tests over arbitrary visibility event sequences.

use proptest::prelude::*;

use veil_core::testing::RecordingCapability;
use veil_core::{
    ContentElement, RevealController, RevealMessage, RevealProps, RevealState,
    VisibilityTracker,
};
use veil_model::{
    ElementHandle, ImageDescriptor, ImageFormat, ObserverConfiguration,
};

const ROOT: ElementHandle = ElementHandle::new(1);

fn bound_tracker(
    capability: &RecordingCapability,
    trigger_once: bool,
) -> VisibilityTracker {
    let mut tracker = VisibilityTracker::new(
        Some(capability),
        &ObserverConfiguration::default(),
        trigger_once,
    );
    tracker.bind(Some(ROOT));
    tracker
}

proptest! {
    #[test]
    fn trigger_once_latches_after_first_visible(
        events in prop::collection::vec(any::<bool>(), 0..32)
    ) {
        let capability = RecordingCapability::new();
        let mut tracker = bound_tracker(&capability, true);
        let (target, subscription) = capability.log().active.unwrap();

        let mut seen_visible = false;
        for visible in events {
            tracker.handle_event(RecordingCapability::event_for(
                target,
                subscription,
                visible,
            ));
            seen_visible |= visible;
            prop_assert_eq!(tracker.ever_visible(), seen_visible);
            prop_assert_eq!(tracker.is_visible(), seen_visible);
            if seen_visible {
                prop_assert!(!tracker.is_observing());
            }
        }
        prop_assert!(capability.log().disconnects <= 1);
    }

    #[test]
    fn continuous_mode_mirrors_latest_event(
        events in prop::collection::vec(any::<bool>(), 1..32)
    ) {
        let capability = RecordingCapability::new();
        let mut tracker = bound_tracker(&capability, false);

        for visible in &events {
            let event = capability.event(*visible).unwrap();
            tracker.handle_event(event);
            prop_assert_eq!(tracker.is_visible(), *visible);
            prop_assert_eq!(
                tracker.current_signal().raw_event.map(|e| e.is_intersecting),
                Some(*visible)
            );
        }
        prop_assert_eq!(tracker.ever_visible(), events.iter().any(|v| *v));
    }

    #[test]
    fn mounted_content_is_never_unmounted(
        events in prop::collection::vec(any::<bool>(), 0..32),
        trigger_once in any::<bool>(),
    ) {
        let capability = RecordingCapability::new();
        let props = RevealProps::new(
            ImageDescriptor::new(10, 5, ImageFormat::Jpeg, "/lqip.jpg"),
            ImageDescriptor::new(100, 50, ImageFormat::Jpeg, "/full.jpg"),
            ContentElement::img("/full.jpg"),
        )
        .trigger_once(trigger_once);
        let mut controller = RevealController::new(props, Some(&capability));
        controller.mount();
        controller.update(RevealMessage::Attach(Some(ROOT)));
        let (target, subscription) = capability.log().active.unwrap();

        let mut mounted = false;
        let mut previous = controller.reveal_state();
        for visible in events {
            controller.update(RevealMessage::Visibility(
                RecordingCapability::event_for(target, subscription, visible),
            ));
            let state = controller.reveal_state();
            prop_assert!(state >= previous);
            previous = state;

            let has_content = controller.view().has_content();
            prop_assert_eq!(has_content, state >= RevealState::Revealing);
            if mounted {
                prop_assert!(has_content);
            }
            mounted |= has_content;
        }
    }

    #[test]
    fn repeated_teardown_disconnects_once(repeats in 1usize..8) {
        let capability = RecordingCapability::new();
        let mut tracker = bound_tracker(&capability, false);
        let event = capability.event(true).unwrap();

        for _ in 0..repeats {
            tracker.teardown();
        }
        prop_assert!(!tracker.handle_event(event));
        prop_assert_eq!(capability.log().disconnects, 1);
    }
}
