//! Inline low-quality placeholders from local image bytes.
//!
//! Hosts that prepare placeholders at build time can embed them as
//! `data:image/...` locators, which makes the placeholder ready the moment
//! a reveal mounts.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageReader, imageops::FilterType};
use thiserror::Error;
use veil_model::{ImageDescriptor, ImageFormat, SourceLocator};

/// Default width of generated inline placeholders, in pixels.
pub const DEFAULT_PLACEHOLDER_WIDTH: u32 = 20;

#[derive(Debug, Error)]
pub enum LqipError {
    #[error("could not determine image format")]
    UnknownFormat,

    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image has zero {0}")]
    Empty(&'static str),
}

/// Describe an encoded image without decoding its pixels.
pub fn describe(
    bytes: &[u8],
    source: impl Into<SourceLocator>,
) -> Result<ImageDescriptor, LqipError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format().ok_or(LqipError::UnknownFormat)?;
    let (width, height) = reader.into_dimensions()?;
    Ok(ImageDescriptor::new(
        width,
        height,
        model_format(format),
        source,
    ))
}

/// Downscale `bytes` to `target_width` and return an inline descriptor.
///
/// Images with an alpha channel are re-encoded as PNG so transparency
/// survives; everything else becomes JPEG, which keeps the payload small.
/// The target width is clamped to the source width.
pub fn inline_placeholder(
    bytes: &[u8],
    target_width: u32,
) -> Result<ImageDescriptor, LqipError> {
    let source = image::load_from_memory(bytes)?;
    if source.width() == 0 {
        return Err(LqipError::Empty("width"));
    }
    if source.height() == 0 {
        return Err(LqipError::Empty("height"));
    }

    let width = target_width.clamp(1, source.width());
    let height = scaled_height(source.width(), source.height(), width);
    let small = source.resize_exact(width, height, FilterType::Triangle);

    let (encoded, format) = if small.color().has_alpha() {
        (encode(&small, image::ImageFormat::Png)?, ImageFormat::Png)
    } else {
        let rgb = DynamicImage::ImageRgb8(small.to_rgb8());
        (encode(&rgb, image::ImageFormat::Jpeg)?, ImageFormat::Jpeg)
    };

    let locator =
        SourceLocator::inline(&format.mime_type(), &STANDARD.encode(encoded));
    log::debug!(
        "inline placeholder {}x{} ({}) from {}x{} source",
        width,
        height,
        format,
        source.width(),
        source.height()
    );
    Ok(ImageDescriptor::new(width, height, format, locator))
}

fn scaled_height(source_width: u32, source_height: u32, width: u32) -> u32 {
    let scaled =
        f64::from(source_height) * f64::from(width) / f64::from(source_width);
    (scaled.round() as u32).max(1)
}

fn encode(
    image: &DynamicImage,
    format: image::ImageFormat,
) -> Result<Vec<u8>, LqipError> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format)?;
    Ok(buffer.into_inner())
}

fn model_format(format: image::ImageFormat) -> ImageFormat {
    format
        .extensions_str()
        .first()
        .map(|ext| ImageFormat::from_extension(ext))
        .unwrap_or_else(|| {
            ImageFormat::Other(format!("{format:?}").to_lowercase())
        })
}
