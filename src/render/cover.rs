use image::imageops::FilterType;

/// Centered source rectangle `(x, y, w, h)` with the aspect ratio of `dst_w`×`dst_h`.
///
/// The rectangle spans the full source in the constraining dimension, so scaling it to the
/// target covers the canvas exactly and never needs an intermediate larger than the source.
pub fn cover_crop(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32, u32, u32) {
    let (sw, sh) = (u64::from(src_w.max(1)), u64::from(src_h.max(1)));
    let (dw, dh) = (u64::from(dst_w.max(1)), u64::from(dst_h.max(1)));

    // Compare sw/sh against dw/dh without floating point.
    let (cw, ch) = if sw * dh > sh * dw {
        (((sh * dw + dh / 2) / dh).clamp(1, sw), sh)
    } else {
        (sw, ((sw * dh + dw / 2) / dw).clamp(1, sh))
    };
    let x = (sw - cw) / 2;
    let y = (sh - ch) / 2;
    (x as u32, y as u32, cw as u32, ch as u32)
}

/// Center-crop to the target aspect ratio, then resample straight to `width`×`height`.
pub fn resize_to_cover(src: &image::DynamicImage, width: u32, height: u32) -> image::RgbaImage {
    let rgba = src.to_rgba8();
    let (sw, sh) = rgba.dimensions();
    if (sw, sh) == (width, height) {
        return rgba;
    }
    let (x, y, cw, ch) = cover_crop(sw, sh, width, height);
    let cropped = image::imageops::crop_imm(&rgba, x, y, cw, ch).to_image();
    image::imageops::resize(&cropped, width, height, FilterType::Lanczos3)
}

/// Largest centered square of `src`.
pub fn center_square(src: &image::DynamicImage) -> image::RgbaImage {
    let rgba = src.to_rgba8();
    let (w, h) = rgba.dimensions();
    let side = w.min(h);
    image::imageops::crop_imm(&rgba, (w - side) / 2, (h - side) / 2, side, side).to_image()
}

#[cfg(test)]
#[path = "../../tests/unit/render/cover.rs"]
mod tests;
