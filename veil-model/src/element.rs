use std::fmt;

/// Opaque reference to a host element.
///
/// Handles are issued by the host framework when it attaches the container
/// produced by a reveal view. veil never interprets the value; it is only
/// forwarded to the visibility capability and compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementHandle(u64);

impl ElementHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for ElementHandle {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}
