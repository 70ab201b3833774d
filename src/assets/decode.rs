use crate::foundation::error::{SocialError, SocialResult};

/// Decode an encoded raster (JPEG, PNG, WebP, ...) into an image buffer.
pub fn decode_image(bytes: &[u8]) -> SocialResult<image::DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| SocialError::asset(format!("decode image from memory: {e}")))
}

pub fn parse_svg(bytes: &[u8]) -> SocialResult<usvg::Tree> {
    let opts = usvg::Options::default();
    usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| SocialError::asset(format!("parse svg tree: {e}")))
}

pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Straight-alpha RGB of one premultiplied pixel.
pub fn unpremultiply_rgb(px: [u8; 4]) -> [u8; 3] {
    let a = u16::from(px[3]);
    match a {
        0 => [0, 0, 0],
        255 => [px[0], px[1], px[2]],
        _ => {
            let un = |c: u8| ((u16::from(c) * 255 + a / 2) / a).min(255) as u8;
            [un(px[0]), un(px[1]), un(px[2])]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
