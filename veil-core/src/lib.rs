//! veil core
//!
//! Lazy, progressive image reveal. A blurred low-quality placeholder renders
//! immediately; the real content is mounted only once its container has been
//! seen in the viewport, and the layers swap once that content reports it
//! finished loading.
//!
//! Layout
//! - [`visibility`]: the tracker wrapping a platform visibility observer.
//! - [`reveal`]: the message-driven controller deciding what to mount and
//!   which layer dominates.
//! - [`content`] and [`placeholder`]: the two stacked layers of a view.
//! - [`runtime`]: tokio driver executing controller effects (the
//!   out-of-band placeholder load).
//! - [`lqip`]: helpers to build inline placeholders from local images.
//!
//! The host framework owns the element tree; veil only sees opaque
//! [`veil_model::ElementHandle`]s and the messages the host forwards.

pub mod content;
pub mod lqip;
mod markup;
pub mod placeholder;
pub mod reveal;
pub mod runtime;
pub mod testing;
pub mod view;
pub mod visibility;

pub use content::{ContentElement, ContentNode, Presentation, StyleMap};
pub use placeholder::PlaceholderView;
pub use reveal::{
    LoadState, MountTicket, RevealController, RevealEffect, RevealMessage,
    RevealProps, RevealState,
};
pub use runtime::{
    LoaderError, LocalFileLoader, PlaceholderLoader, RevealDriver,
};
pub use view::{ContainerView, NodeRef, RevealView};
pub use visibility::{
    ObserverEntry, SubscriptionId, VisibilityCapability, VisibilityEvent,
    VisibilityObserver, VisibilitySignal, VisibilityTracker,
};
