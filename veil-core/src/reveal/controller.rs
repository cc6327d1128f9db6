//! Progressive reveal controller
//!
//! Drives one reveal from mount to unmount:
//!
//! ```text
//! Hidden --mount--> PlaceholderOnly --ever visible--> Revealing --load--> Revealed
//! ```
//!
//! The controller is a pure state machine. Hosts feed it [`RevealMessage`]s
//! and carry out the [`RevealEffect`]s it returns; it never performs I/O or
//! touches the platform directly, apart from the observer owned by its
//! [`VisibilityTracker`].
//!
//! The ready callback is independent of visibility. Inline placeholders are
//! ready the moment they mount; anything else is loaded once out of band,
//! because some renderers do not reliably deliver `load` for the rendered
//! placeholder image. Whichever of the side load or the rendered image
//! reports first fires the callback; it never fires twice per mount.

use crate::content::{ContentNode, Presentation, StyleMap};
use crate::markup::join_classes;
use crate::placeholder::PlaceholderView;
use crate::view::{ContainerView, NodeRef, RevealView};
use crate::visibility::{VisibilityCapability, VisibilityTracker};

use super::messages::{RevealEffect, RevealMessage};
use super::props::RevealProps;
use super::state::{LoadState, MountTicket, RevealState};

pub struct RevealController<C: ContentNode> {
    props: RevealProps<C>,
    tracker: VisibilityTracker,
    reveal_state: RevealState,
    load_state: LoadState,
    ticket: Option<MountTicket>,
    next_ticket: u64,
    pending_side_load: Option<MountTicket>,
    ready_fired: bool,
    disposed: bool,
}

impl<C: ContentNode> RevealController<C> {
    /// Create a controller. `capability` is the platform's visibility
    /// observation support, `None` when the environment has none.
    pub fn new(
        props: RevealProps<C>,
        capability: Option<&dyn VisibilityCapability>,
    ) -> Self {
        let tracker = VisibilityTracker::new(
            capability,
            &props.observer,
            props.trigger_once,
        );
        Self {
            props,
            tracker,
            reveal_state: RevealState::Hidden,
            load_state: LoadState::NotLoaded,
            ticket: None,
            next_ticket: 0,
            pending_side_load: None,
            ready_fired: false,
            disposed: false,
        }
    }

    /// Mount the placeholder. Returns the side load to start, if any.
    pub fn mount(&mut self) -> Vec<RevealEffect> {
        if self.disposed || self.reveal_state != RevealState::Hidden {
            log::warn!(
                "mount ignored: controller is {} (disposed: {})",
                self.reveal_state,
                self.disposed
            );
            return Vec::new();
        }

        self.next_ticket += 1;
        let ticket = MountTicket::new(self.next_ticket);
        self.ticket = Some(ticket);
        self.transition(RevealState::PlaceholderOnly);

        let mut effects = Vec::new();
        if self.props.on_ready.is_some() {
            if self.props.placeholder.is_inline() {
                self.fire_ready();
            } else {
                log::debug!(
                    "side loading placeholder {} for {ticket}",
                    self.props.placeholder.source
                );
                self.pending_side_load = Some(ticket);
                effects.push(RevealEffect::SideLoadPlaceholder {
                    ticket,
                    source: self.props.placeholder.source.clone(),
                });
            }
        }

        self.sync_visibility();
        effects
    }

    /// Consume one message. Every message after [`unmount`] is a no-op.
    ///
    /// [`unmount`]: RevealController::unmount
    pub fn update(&mut self, message: RevealMessage) -> Vec<RevealEffect> {
        if self.disposed {
            log::debug!("ignoring {message:?} after unmount");
            return Vec::new();
        }

        match message {
            RevealMessage::Attach(element) => {
                self.tracker.bind(element);
                self.sync_visibility();
            }
            RevealMessage::Visibility(event) => {
                if self.tracker.handle_event(event) {
                    self.sync_visibility();
                }
            }
            RevealMessage::ContentLoad | RevealMessage::ContentLoadedData => {
                self.content_loaded();
            }
            RevealMessage::PlaceholderElementLoaded => self.fire_ready(),
            RevealMessage::PlaceholderSideLoaded(ticket) => {
                if self.take_pending(ticket) {
                    self.fire_ready();
                }
            }
            RevealMessage::PlaceholderSideLoadFailed { ticket, reason } => {
                if self.take_pending(ticket) {
                    log::warn!(
                        "placeholder side load for {ticket} failed: {reason}"
                    );
                }
            }
        }

        Vec::new()
    }

    /// Replace the props after a host re-render.
    ///
    /// Geometry follows the new descriptors on the next [`view`]. The
    /// observer keeps the options it was created with, and no new side
    /// load is issued for the current mount.
    ///
    /// [`view`]: RevealController::view
    pub fn set_props(&mut self, props: RevealProps<C>) {
        if props.observer != self.props.observer
            || props.trigger_once != self.props.trigger_once
        {
            log::debug!(
                "observer options changed after creation; keeping the active observer"
            );
        }
        self.props = props;
    }

    /// Tear the reveal down: release the observer and cancel any pending
    /// side load. Idempotent.
    pub fn unmount(&mut self) -> Vec<RevealEffect> {
        if self.disposed {
            return Vec::new();
        }
        self.disposed = true;
        self.tracker.teardown();
        log::debug!("reveal unmounted in state {}", self.reveal_state);

        self.pending_side_load
            .take()
            .map(RevealEffect::CancelSideLoad)
            .into_iter()
            .collect()
    }

    /// The current render output.
    pub fn view(&self) -> RevealView<C> {
        let props = &self.props;
        let content = self
            .reveal_state
            .content_mounted()
            .then(|| props.content.with_presentation(self.presentation()));

        RevealView {
            container: ContainerView {
                node_ref: NodeRef,
                class_name: join_classes([
                    props.class_name.as_str(),
                    props.classes.container.as_str(),
                ]),
                style: props.style.clone(),
            },
            placeholder: PlaceholderView::new(
                &props.placeholder,
                &props.full,
                &props.blur_strength,
                &props.placeholder_class_name,
                &props.classes,
                self.load_state,
            ),
            content,
            reveal_state: self.reveal_state,
            load_state: self.load_state,
        }
    }

    /// Attributes injected into the real content.
    pub fn presentation(&self) -> Presentation {
        let props = &self.props;
        let classes = &props.classes;
        let own_class = props.content.class_name().unwrap_or_default();
        let class_name = if self.load_state.is_loaded() {
            let skip_anim = if props.blur_strength.disables_animation() {
                classes.skip_anim.as_str()
            } else {
                ""
            };
            join_classes([
                own_class,
                classes.loaded.as_str(),
                skip_anim,
                classes.original.as_str(),
            ])
        } else {
            join_classes([own_class, classes.original.as_str()])
        };

        let offset =
            StyleMap::new().with("margin-top", props.full.content_offset_css());
        let style = match props.content.style() {
            Some(own) => own.merged(&offset),
            None => offset,
        };

        Presentation {
            class_name,
            style,
            on_load: RevealMessage::ContentLoad,
            on_loaded_data: RevealMessage::ContentLoadedData,
        }
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal_state
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn tracker(&self) -> &VisibilityTracker {
        &self.tracker
    }

    pub fn props(&self) -> &RevealProps<C> {
        &self.props
    }

    /// Ticket of the current mount, if mounted.
    pub fn ticket(&self) -> Option<MountTicket> {
        self.ticket
    }

    pub fn ready_fired(&self) -> bool {
        self.ready_fired
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn sync_visibility(&mut self) {
        if self.reveal_state == RevealState::PlaceholderOnly
            && self.tracker.ever_visible()
        {
            self.transition(RevealState::Revealing);
        }
    }

    fn content_loaded(&mut self) {
        if !self.reveal_state.content_mounted() {
            log::debug!(
                "content load reported while {}; content is not mounted",
                self.reveal_state
            );
            return;
        }
        if self.load_state.is_loaded() {
            return;
        }
        self.load_state = LoadState::Loaded;
        self.transition(RevealState::Revealed);
    }

    fn take_pending(&mut self, ticket: MountTicket) -> bool {
        if self.pending_side_load == Some(ticket) {
            self.pending_side_load = None;
            true
        } else {
            log::debug!("ignoring side load result for stale {ticket}");
            false
        }
    }

    fn fire_ready(&mut self) {
        if self.ready_fired || self.reveal_state == RevealState::Hidden {
            return;
        }
        if let Some(on_ready) = self.props.on_ready.as_mut() {
            self.ready_fired = true;
            on_ready();
        }
    }

    fn transition(&mut self, next: RevealState) {
        debug_assert!(next > self.reveal_state);
        log::debug!("reveal {} -> {}", self.reveal_state, next);
        self.reveal_state = next;
    }
}

impl<C: ContentNode> std::fmt::Debug for RevealController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealController")
            .field("reveal_state", &self.reveal_state)
            .field("load_state", &self.load_state)
            .field("tracker", &self.tracker)
            .field("ticket", &self.ticket)
            .field("pending_side_load", &self.pending_side_load)
            .field("ready_fired", &self.ready_fired)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::content::{ContentElement, StyleMap};
    use crate::testing::RecordingCapability;
    use veil_model::{ElementHandle, ImageDescriptor, ImageFormat};

    const ROOT: ElementHandle = ElementHandle::new(10);

    fn props(lqip_source: &str) -> RevealProps<ContentElement> {
        RevealProps::new(
            ImageDescriptor::new(20, 10, ImageFormat::Jpeg, lqip_source),
            ImageDescriptor::new(100, 50, ImageFormat::Jpeg, "/full.jpg"),
            ContentElement::img("/full.jpg").with_class("hero"),
        )
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = Rc::clone(&count);
        (count, move || handle.set(handle.get() + 1))
    }

    #[test]
    fn content_waits_for_visibility() {
        let capability = RecordingCapability::new();
        let mut controller =
            RevealController::new(props("/lqip.jpg"), Some(&capability));

        assert_eq!(controller.reveal_state(), RevealState::Hidden);
        controller.mount();
        controller.update(RevealMessage::Attach(Some(ROOT)));
        assert_eq!(controller.reveal_state(), RevealState::PlaceholderOnly);
        assert!(!controller.view().has_content());

        let event = capability.event(true).unwrap();
        controller.update(RevealMessage::Visibility(event));
        assert_eq!(controller.reveal_state(), RevealState::Revealing);
        assert!(controller.view().has_content());
    }

    #[test]
    fn load_before_reveal_is_ignored() {
        let capability = RecordingCapability::new();
        let mut controller =
            RevealController::new(props("/lqip.jpg"), Some(&capability));
        controller.mount();

        controller.update(RevealMessage::ContentLoad);
        assert_eq!(controller.load_state(), LoadState::NotLoaded);
        assert_eq!(controller.reveal_state(), RevealState::PlaceholderOnly);
    }

    #[test]
    fn either_load_event_reveals_once() {
        let mut controller = RevealController::new(props("/lqip.jpg"), None);
        controller.mount();
        assert_eq!(controller.reveal_state(), RevealState::Revealing);

        controller.update(RevealMessage::ContentLoadedData);
        assert_eq!(controller.reveal_state(), RevealState::Revealed);
        controller.update(RevealMessage::ContentLoad);
        assert_eq!(controller.load_state(), LoadState::Loaded);
        assert_eq!(controller.reveal_state(), RevealState::Revealed);
    }

    #[test]
    fn presentation_carries_offset_and_classes() {
        let mut controller = RevealController::new(
            props("/lqip.jpg").blur_strength("0"),
            None,
        );
        controller.mount();

        let loading = controller.presentation();
        assert_eq!(loading.class_name, "hero veil-original");
        assert_eq!(loading.style.get("margin-top"), Some("-50%"));

        controller.update(RevealMessage::ContentLoad);
        let loaded = controller.presentation();
        assert_eq!(
            loaded.class_name,
            "hero veil-loaded veil-skip-anim veil-original"
        );
    }

    #[test]
    fn caller_style_is_preserved_in_presentation() {
        let content = ContentElement::img("/full.jpg")
            .with_style(StyleMap::new().with("opacity", "0.9"));
        let mut props = props("/lqip.jpg");
        props.content = content;
        let controller = RevealController::new(props, None);

        let style = controller.presentation().style;
        assert_eq!(style.get("opacity"), Some("0.9"));
        assert_eq!(style.get("margin-top"), Some("-50%"));
    }

    #[test]
    fn computed_offset_wins_over_caller_margin() {
        let content = ContentElement::img("/full.jpg").with_style(
            StyleMap::new()
                .with("margin-top", "12px")
                .with("opacity", "0.9"),
        );
        let mut props = props("/lqip.jpg");
        props.content = content.clone();
        let controller = RevealController::new(props, None);

        let style = controller.presentation().style;
        assert_eq!(style.get("margin-top"), Some("-50%"));
        assert_eq!(style.get("opacity"), Some("0.9"));
        assert_eq!(style.len(), 2);
        // The caller's node keeps its own declarations.
        assert_eq!(
            content.style().and_then(|own| own.get("margin-top")),
            Some("12px")
        );
    }

    #[test]
    fn set_props_recomputes_geometry() {
        let mut controller = RevealController::new(props("/lqip.jpg"), None);
        controller.mount();

        let mut next = props("/lqip.jpg");
        next.full = ImageDescriptor::new(200, 300, ImageFormat::Jpeg, "/f.jpg");
        controller.set_props(next);

        let view = controller.view();
        assert_eq!(view.placeholder.view_box, (200, 300));
        let content = view.content.unwrap();
        assert_eq!(
            content.style.unwrap().get("margin-top"),
            Some("-150%")
        );
    }

    #[test]
    fn inline_placeholder_is_ready_on_mount() {
        let (count, on_ready) = counter();
        let mut controller = RevealController::new(
            props("data:image/jpeg;base64,/9j/").on_ready(on_ready),
            None,
        );

        let effects = controller.mount();
        assert!(effects.is_empty());
        assert_eq!(count.get(), 1);

        controller.update(RevealMessage::PlaceholderElementLoaded);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn remote_placeholder_is_side_loaded_once() {
        let (count, on_ready) = counter();
        let capability = RecordingCapability::new();
        let mut controller = RevealController::new(
            props("/lqip.jpg").on_ready(on_ready),
            Some(&capability),
        );

        let effects = controller.mount();
        let ticket = controller.ticket().unwrap();
        assert_eq!(
            effects,
            vec![RevealEffect::SideLoadPlaceholder {
                ticket,
                source: "/lqip.jpg".into(),
            }]
        );
        assert_eq!(count.get(), 0);
        assert!(controller.mount().is_empty());

        controller.update(RevealMessage::PlaceholderSideLoaded(ticket));
        assert_eq!(count.get(), 1);
        controller.update(RevealMessage::PlaceholderSideLoaded(ticket));
        controller.update(RevealMessage::PlaceholderElementLoaded);
        assert_eq!(count.get(), 1);
        // Ready does not depend on visibility.
        assert_eq!(controller.reveal_state(), RevealState::PlaceholderOnly);
    }

    #[test]
    fn rendered_placeholder_load_can_fire_ready_first() {
        let (count, on_ready) = counter();
        let mut controller = RevealController::new(
            props("/lqip.jpg").on_ready(on_ready),
            None,
        );
        controller.mount();
        let ticket = controller.ticket().unwrap();

        controller.update(RevealMessage::PlaceholderElementLoaded);
        assert_eq!(count.get(), 1);
        controller.update(RevealMessage::PlaceholderSideLoaded(ticket));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn no_side_load_without_ready_callback() {
        let mut controller = RevealController::new(props("/lqip.jpg"), None);
        assert!(controller.mount().is_empty());
        controller.update(RevealMessage::PlaceholderElementLoaded);
        assert!(!controller.ready_fired());
    }

    #[test]
    fn failed_side_load_does_not_fire_ready() {
        let (count, on_ready) = counter();
        let mut controller = RevealController::new(
            props("/lqip.jpg").on_ready(on_ready),
            None,
        );
        controller.mount();
        let ticket = controller.ticket().unwrap();

        controller.update(RevealMessage::PlaceholderSideLoadFailed {
            ticket,
            reason: "not found".to_string(),
        });
        controller.update(RevealMessage::PlaceholderSideLoaded(ticket));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn unmount_cancels_and_silences() {
        let (count, on_ready) = counter();
        let capability = RecordingCapability::new();
        let mut controller = RevealController::new(
            props("/lqip.jpg").on_ready(on_ready),
            Some(&capability),
        );
        controller.mount();
        controller.update(RevealMessage::Attach(Some(ROOT)));
        let ticket = controller.ticket().unwrap();
        let event = capability.event(true).unwrap();

        assert_eq!(
            controller.unmount(),
            vec![RevealEffect::CancelSideLoad(ticket)]
        );
        assert!(controller.unmount().is_empty());
        assert_eq!(capability.log().disconnects, 1);

        controller.update(RevealMessage::PlaceholderSideLoaded(ticket));
        controller.update(RevealMessage::Visibility(event));
        assert_eq!(count.get(), 0);
        assert_eq!(controller.reveal_state(), RevealState::PlaceholderOnly);
        assert!(controller.mount().is_empty());
    }

    #[test]
    fn container_classes_and_style() {
        let controller = RevealController::new(
            props("/lqip.jpg")
                .class_name("card")
                .style(StyleMap::new().with("width", "100%")),
            None,
        );
        let view = controller.view();
        assert_eq!(view.container.class_name, "card veil-container");
        assert_eq!(view.container.style.get("width"), Some("100%"));
        assert_eq!(
            view.container.node_ref.attach(ROOT),
            RevealMessage::Attach(Some(ROOT))
        );
    }
}
