use std::fmt;

/// How far a reveal has progressed. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum RevealState {
    /// Not mounted yet.
    #[default]
    Hidden,
    /// Mounted; only the placeholder layer is rendered.
    PlaceholderOnly,
    /// The container has been seen; real content is mounted and loading.
    Revealing,
    /// Real content finished loading and dominates the placeholder.
    Revealed,
}

impl RevealState {
    /// Whether the real content belongs in the render tree.
    pub fn content_mounted(self) -> bool {
        self >= RevealState::Revealing
    }
}

impl fmt::Display for RevealState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RevealState::Hidden => "hidden",
            RevealState::PlaceholderOnly => "placeholder-only",
            RevealState::Revealing => "revealing",
            RevealState::Revealed => "revealed",
        };
        f.write_str(label)
    }
}

/// Load state of the mounted real content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loaded,
}

impl LoadState {
    pub fn is_loaded(self) -> bool {
        matches!(self, LoadState::Loaded)
    }
}

/// Identifies one mount of a controller.
///
/// Side-load completions carry the ticket they were issued for; a completion
/// whose ticket no longer matches is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MountTicket(u64);

impl MountTicket {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MountTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount#{}", self.0)
    }
}
