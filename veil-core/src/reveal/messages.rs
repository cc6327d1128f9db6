use veil_model::{ElementHandle, SourceLocator};

use super::state::MountTicket;
use crate::visibility::VisibilityEvent;

/// Everything a host can tell a reveal controller.
#[derive(Debug, Clone, PartialEq)]
pub enum RevealMessage {
    /// The host attached (or detached, with `None`) the container element.
    Attach(Option<ElementHandle>),
    /// The platform observer reported on the container.
    Visibility(VisibilityEvent),
    /// The real content fired `load`.
    ContentLoad,
    /// The real content fired `loadeddata`.
    ContentLoadedData,
    /// The rendered placeholder image fired `load`.
    PlaceholderElementLoaded,
    /// The out-of-band placeholder load finished.
    PlaceholderSideLoaded(MountTicket),
    /// The out-of-band placeholder load failed.
    PlaceholderSideLoadFailed { ticket: MountTicket, reason: String },
}

/// Work the controller asks its host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealEffect {
    /// Load `source` out of band and answer with
    /// [`RevealMessage::PlaceholderSideLoaded`] or
    /// [`RevealMessage::PlaceholderSideLoadFailed`] for `ticket`.
    SideLoadPlaceholder {
        ticket: MountTicket,
        source: SourceLocator,
    },
    /// Abandon the side load issued for `ticket`.
    CancelSideLoad(MountTicket),
}
