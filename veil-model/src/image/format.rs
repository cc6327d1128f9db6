use std::{fmt, str::FromStr};

use crate::ModelError;

/// Encoded format of an image source.
///
/// Only the distinction between `Png` and everything else changes how a
/// placeholder is rendered; the remaining variants exist so descriptors
/// round-trip the format names hosts hand us.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
    Gif,
    Avif,
    Other(String),
}

impl ImageFormat {
    pub fn is_png(&self) -> bool {
        matches!(self, ImageFormat::Png)
    }

    /// Lowercase name used in filter ids and mime types.
    pub fn as_str(&self) -> &str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Webp => "webp",
            ImageFormat::Gif => "gif",
            ImageFormat::Avif => "avif",
            ImageFormat::Other(name) => name.as_str(),
        }
    }

    pub fn mime_type(&self) -> String {
        format!("image/{}", self.as_str())
    }

    /// Classify a file extension; `jpg` and `jpeg` are the same format.
    pub fn from_extension(ext: &str) -> Self {
        Self::from(ext.trim_start_matches('.').to_string())
    }
}

impl From<String> for ImageFormat {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "png" => ImageFormat::Png,
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "webp" => ImageFormat::Webp,
            "gif" => ImageFormat::Gif,
            "avif" => ImageFormat::Avif,
            other => ImageFormat::Other(other.to_string()),
        }
    }
}

impl From<ImageFormat> for String {
    fn from(format: ImageFormat) -> Self {
        format.as_str().to_string()
    }
}

impl FromStr for ImageFormat {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ModelError::EmptyFormat);
        }
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
