use std::fmt;

use url::Url;

/// Marker the inline check looks for anywhere in the locator.
const INLINE_IMAGE_MARKER: &str = "data:image";

/// Where an image's bytes live.
///
/// Either an inline-encoded `data:image/...` payload, which is available the
/// moment it is rendered, or a reference that has to be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SourceLocator(String);

impl SourceLocator {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build an inline locator from an already base64-encoded payload.
    pub fn inline(mime_type: &str, base64_payload: &str) -> Self {
        Self(format!("data:{mime_type};base64,{base64_payload}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_inline(&self) -> bool {
        self.0.contains(INLINE_IMAGE_MARKER)
    }

    /// Parse the locator as an absolute URL. Relative paths and inline
    /// payloads that fail URL parsing return `None`.
    pub fn as_url(&self) -> Option<Url> {
        Url::parse(&self.0).ok()
    }
}

impl From<&str> for SourceLocator {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SourceLocator {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Inline payloads can be many kilobytes; keep logs readable.
        if self.is_inline() && self.0.len() > 48 {
            let head = self.0.get(..32).unwrap_or(&self.0);
            write!(f, "{}...({} bytes)", head, self.0.len())
        } else {
            f.write_str(&self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_inline_payloads() {
        assert!(SourceLocator::inline("image/png", "AAAA").is_inline());
        assert!(SourceLocator::new("data:image/jpeg;base64,/9j/").is_inline());
        assert!(!SourceLocator::new("https://cdn.test/a.jpg").is_inline());
        assert!(!SourceLocator::new("/static/lqip/a.jpg").is_inline());
    }

    #[test]
    fn parses_absolute_urls_only() {
        let url = SourceLocator::new("https://cdn.test/a.jpg")
            .as_url()
            .expect("absolute url");
        assert_eq!(url.host_str(), Some("cdn.test"));
        assert!(SourceLocator::new("relative/a.jpg").as_url().is_none());
    }

    #[test]
    fn display_truncates_long_inline_payloads() {
        let payload = "A".repeat(200);
        let locator = SourceLocator::inline("image/png", &payload);
        let shown = locator.to_string();
        assert!(shown.starts_with("data:image/png;base64,"));
        assert!(shown.ends_with(&format!("({} bytes)", locator.as_str().len())));
    }
}
