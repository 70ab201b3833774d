use image::imageops::FilterType;

use crate::{
    assets::{decode::premultiply_rgba8_in_place, logo::PremulPatch},
    render::cover::center_square,
};

/// Mask supersampling factor used for anti-aliased circle edges.
pub const MASK_SUPERSAMPLE: u32 = 4;

/// Anti-aliased disc mask of `diameter` pixels.
///
/// The disc is rasterized with hard edges at `MASK_SUPERSAMPLE`× resolution and downsampled.
pub fn circle_mask(diameter: u32) -> image::GrayImage {
    let d = diameter.max(1);
    let big = d * MASK_SUPERSAMPLE;
    let r = big as f32 / 2.0;
    let hi = image::GrayImage::from_fn(big, big, |x, y| {
        let dx = x as f32 + 0.5 - r;
        let dy = y as f32 + 0.5 - r;
        if dx * dx + dy * dy <= r * r {
            image::Luma([255])
        } else {
            image::Luma([0])
        }
    });
    image::imageops::resize(&hi, d, d, FilterType::Lanczos3)
}

/// Border width for an avatar of `diameter` pixels.
pub fn border_width(diameter: u32) -> u32 {
    diameter / 50
}

/// Circular avatar with a white ring, as a premultiplied patch of `diameter`×`diameter`.
///
/// The photo is center-cropped to a square and scaled to fit inside the ring.
pub fn circular_avatar(photo: &image::DynamicImage, diameter: u32) -> PremulPatch {
    let d = diameter.max(1);
    let border = border_width(d);
    let inner = d.saturating_sub(2 * border).max(1);

    let square = center_square(photo);
    let scaled = image::imageops::resize(&square, inner, inner, FilterType::Lanczos3);
    let outer_mask = circle_mask(d);
    let inner_mask = circle_mask(inner);

    let mut data = Vec::with_capacity((d * d * 4) as usize);
    for y in 0..d {
        for x in 0..d {
            let ring = outer_mask.get_pixel(x, y).0[0];
            let (ix, iy) = (x.wrapping_sub(border), y.wrapping_sub(border));
            let photo_px = if ix < inner && iy < inner {
                let m = inner_mask.get_pixel(ix, iy).0[0];
                let p = scaled.get_pixel(ix, iy).0;
                Some((p, m))
            } else {
                None
            };

            // White ring underneath, photo composited on top of it.
            let mut px = [255u8, 255, 255, ring];
            if let Some((p, m)) = photo_px {
                let a = (u16::from(p[3]) * u16::from(m) + 127) / 255;
                let blend = |src: u8, dst: u8| -> u8 {
                    ((u16::from(src) * a + u16::from(dst) * (255 - a) + 127) / 255) as u8
                };
                px = [
                    blend(p[0], px[0]),
                    blend(p[1], px[1]),
                    blend(p[2], px[2]),
                    px[3].max(a as u8),
                ];
            }
            data.extend_from_slice(&px);
        }
    }
    premultiply_rgba8_in_place(&mut data);
    PremulPatch {
        width: d,
        height: d,
        data,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/avatar.rs"]
mod tests;
