use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::{
    assets::decode::{decode_image, parse_svg, premultiply_rgba8_in_place},
    foundation::error::{SocialError, SocialResult},
};

/// Premultiplied RGBA8 pixels, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PremulPatch {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Watermark loaded once at renderer construction.
#[derive(Clone, Debug)]
pub enum Logo {
    Svg(Arc<usvg::Tree>),
    Raster(Arc<image::RgbaImage>),
}

// Avoid pathological allocations from odd logo aspect ratios.
const MAX_DIM: u32 = 16_384;

impl Logo {
    /// Load an `.svg` file as a vector logo, anything else as a raster.
    pub fn load(path: &Path) -> SocialResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read logo '{}'", path.display()))?;
        let is_svg = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        if is_svg {
            Ok(Self::Svg(Arc::new(parse_svg(&bytes)?)))
        } else {
            Ok(Self::Raster(Arc::new(decode_image(&bytes)?.to_rgba8())))
        }
    }

    /// Natural size in pixels (SVG user units for vector logos).
    pub fn natural_size(&self) -> (f32, f32) {
        match self {
            Logo::Svg(tree) => (tree.size().width(), tree.size().height()),
            Logo::Raster(img) => (img.width() as f32, img.height() as f32),
        }
    }

    /// Rasterize at `height` pixels, preserving the aspect ratio.
    pub fn rasterize(&self, height: u32) -> SocialResult<PremulPatch> {
        let (nw, nh) = self.natural_size();
        if !nw.is_finite() || !nh.is_finite() || nw <= 0.0 || nh <= 0.0 {
            return Err(SocialError::asset("logo has invalid width/height"));
        }
        let height = height.max(1);
        let width = ((height as f32) * nw / nh).round().max(1.0) as u32;
        if width > MAX_DIM || height > MAX_DIM {
            return Err(SocialError::asset(format!(
                "logo raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
            )));
        }

        match self {
            Logo::Svg(tree) => rasterize_svg_to_premul(tree, width, height),
            Logo::Raster(img) => {
                let scaled = image::imageops::resize(
                    img.as_ref(),
                    width,
                    height,
                    image::imageops::FilterType::Lanczos3,
                );
                let mut data = scaled.into_raw();
                premultiply_rgba8_in_place(&mut data);
                Ok(PremulPatch {
                    width,
                    height,
                    data,
                })
            }
        }
    }
}

fn rasterize_svg_to_premul(tree: &usvg::Tree, width: u32, height: u32) -> SocialResult<PremulPatch> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| SocialError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(PremulPatch {
        width,
        height,
        data: pixmap.data().to_vec(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/logo.rs"]
mod tests;
