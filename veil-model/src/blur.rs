use std::fmt;

/// Default standard deviation of the placeholder blur.
pub const DEFAULT_BLUR_STRENGTH: &str = "18";

/// Placeholder blur strength.
///
/// Kept as the string the host passed so it can be written into the blur
/// filter verbatim. A value that parses to zero disables the cross-fade.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BlurStrength(String);

impl BlurStrength {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok()
    }

    /// Zero strength means "no blur, no animation": layers swap instantly.
    pub fn disables_animation(&self) -> bool {
        self.as_f64() == Some(0.0)
    }
}

impl Default for BlurStrength {
    fn default() -> Self {
        Self(DEFAULT_BLUR_STRENGTH.to_string())
    }
}

impl From<&str> for BlurStrength {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for BlurStrength {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<u32> for BlurStrength {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for BlurStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
