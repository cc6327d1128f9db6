use crate::ElementHandle;

/// Options forwarded opaquely to the platform visibility capability.
///
/// Mirrors the recognised keys of an intersection observer: an optional
/// scroll root, a CSS-style margin around that root, and the ratios at
/// which the platform should emit events. The default is the empty
/// configuration, which lets the platform pick its own defaults.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ObserverConfiguration {
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub root: Option<ElementHandle>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub root_margin: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub threshold: Vec<f64>,
}

impl ObserverConfiguration {
    pub fn with_root(mut self, root: ElementHandle) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_root_margin(mut self, margin: impl Into<String>) -> Self {
        self.root_margin = Some(margin.into());
        self
    }

    pub fn with_threshold(mut self, threshold: impl Into<Vec<f64>>) -> Self {
        self.threshold = threshold.into();
        self
    }

    /// True when no option is set and the platform defaults apply.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
            && self.root_margin.is_none()
            && self.threshold.is_empty()
    }
}
