use image::ImageEncoder as _;

use crate::foundation::error::{SocialError, SocialResult};

/// `Cache-Control` value served with rendered previews.
pub const CACHE_CONTROL_HEADER: &str = "max-age=600";

/// JPEG quality used when callers have no preference.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode a render as baseline JPEG. `quality` is clamped to `1..=100`.
pub fn encode_jpeg(img: &image::RgbImage, quality: u8) -> SocialResult<Vec<u8>> {
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| SocialError::render(format!("encode jpeg: {e}")))?;
    Ok(out)
}

pub fn encode_png(img: &image::RgbImage) -> SocialResult<Vec<u8>> {
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| SocialError::render(format!("encode png: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
