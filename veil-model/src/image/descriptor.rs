use crate::{ImageFormat, ModelError, ModelResult, SourceLocator};

/// An already-resolved image: pixel size, encoding, and where it lives.
///
/// Two descriptors travel together through a reveal: the low-quality
/// placeholder and the full-quality original. Descriptors are immutable
/// once handed to veil.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageDescriptor {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub source: SourceLocator,
}

impl ImageDescriptor {
    pub fn new(
        width: u32,
        height: u32,
        format: ImageFormat,
        source: impl Into<SourceLocator>,
    ) -> Self {
        Self {
            width,
            height,
            format,
            source: source.into(),
        }
    }

    /// Like [`ImageDescriptor::new`], but rejects zero dimensions.
    ///
    /// The reveal pipeline itself never validates descriptors; hosts that
    /// build descriptors from untrusted input can opt in here.
    pub fn checked(
        width: u32,
        height: u32,
        format: ImageFormat,
        source: impl Into<SourceLocator>,
    ) -> ModelResult<Self> {
        if width == 0 {
            return Err(ModelError::ZeroDimension("width"));
        }
        if height == 0 {
            return Err(ModelError::ZeroDimension("height"));
        }
        Ok(Self::new(width, height, format, source))
    }

    /// `height / width`. Not finite when `width` is zero.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }

    /// Vertical offset, in percent of the element's own width, that pulls
    /// content up over a placeholder of this shape.
    pub fn content_offset_percent(&self) -> f64 {
        -(self.aspect_ratio() * 100.0)
    }

    /// The CSS value for [`ImageDescriptor::content_offset_percent`].
    pub fn content_offset_css(&self) -> String {
        format!("{}%", self.content_offset_percent())
    }

    pub fn is_inline(&self) -> bool {
        self.source.is_inline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jpeg(width: u32, height: u32) -> ImageDescriptor {
        ImageDescriptor::new(width, height, ImageFormat::Jpeg, "/a.jpg")
    }

    #[test]
    fn offset_matches_aspect_ratio() {
        assert_eq!(jpeg(100, 50).content_offset_percent(), -50.0);
        assert_eq!(jpeg(100, 50).content_offset_css(), "-50%");
        assert_eq!(jpeg(400, 600).content_offset_css(), "-150%");
    }

    #[test]
    fn zero_width_is_not_finite() {
        assert!(!jpeg(0, 50).content_offset_percent().is_finite());
    }

    #[test]
    fn checked_rejects_zero_dimensions() {
        assert_eq!(
            ImageDescriptor::checked(0, 1, ImageFormat::Png, "a"),
            Err(ModelError::ZeroDimension("width"))
        );
        assert_eq!(
            ImageDescriptor::checked(1, 0, ImageFormat::Png, "a"),
            Err(ModelError::ZeroDimension("height"))
        );
        assert!(ImageDescriptor::checked(1, 1, ImageFormat::Png, "a").is_ok());
    }
}
