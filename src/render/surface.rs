use crate::{
    assets::{decode::unpremultiply_rgb, logo::PremulPatch},
    foundation::error::{SocialError, SocialResult},
};

pub type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel onto another.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(src[i], dc);
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Working canvas of the compositor: premultiplied RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Wrap an opaque-or-straight RGBA image; pixels are premultiplied on the way in.
    pub fn from_rgba(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        crate::assets::decode::premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> PremulRgba8 {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Composite a same-sized premultiplied layer over the whole surface.
    pub fn over_layer(&mut self, layer: &[u8]) -> SocialResult<()> {
        if layer.len() != self.data.len() {
            return Err(SocialError::render(
                "layer must match surface size",
            ));
        }
        for (d, s) in self.data.chunks_exact_mut(4).zip(layer.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
        Ok(())
    }

    /// Composite `patch` with its top-left corner at (`x`, `y`); parts outside are clipped.
    pub fn over_patch(&mut self, patch: &PremulPatch, x: i64, y: i64) {
        for py in 0..patch.height as i64 {
            let dy = y + py;
            if dy < 0 || dy >= self.height as i64 {
                continue;
            }
            for px in 0..patch.width as i64 {
                let dx = x + px;
                if dx < 0 || dx >= self.width as i64 {
                    continue;
                }
                let si = ((py * patch.width as i64 + px) * 4) as usize;
                let di = ((dy * self.width as i64 + dx) * 4) as usize;
                let src = [
                    patch.data[si],
                    patch.data[si + 1],
                    patch.data[si + 2],
                    patch.data[si + 3],
                ];
                let dst = [
                    self.data[di],
                    self.data[di + 1],
                    self.data[di + 2],
                    self.data[di + 3],
                ];
                self.data[di..di + 4].copy_from_slice(&over(dst, src));
            }
        }
    }

    /// Black overlay whose alpha falls linearly from `top_alpha` on the first row to 0 on the
    /// last row.
    pub fn apply_vertical_gradient(&mut self, top_alpha: u8) {
        let rows = self.height;
        let row_bytes = self.width as usize * 4;
        for (y, row) in self.data.chunks_exact_mut(row_bytes).enumerate() {
            let alpha = gradient_alpha(top_alpha, y as u32, rows);
            if alpha == 0 {
                continue;
            }
            let src = [0, 0, 0, alpha];
            for d in row.chunks_exact_mut(4) {
                let out = over([d[0], d[1], d[2], d[3]], src);
                d.copy_from_slice(&out);
            }
        }
    }

    /// Drop the alpha channel.
    pub fn into_rgb(self) -> SocialResult<image::RgbImage> {
        let mut rgb = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for px in self.data.chunks_exact(4) {
            rgb.extend_from_slice(&unpremultiply_rgb([px[0], px[1], px[2], px[3]]));
        }
        image::RgbImage::from_raw(self.width, self.height, rgb)
            .ok_or_else(|| SocialError::render("rgb buffer size mismatch"))
    }
}

/// Alpha of gradient row `y` out of `rows`.
pub fn gradient_alpha(top_alpha: u8, y: u32, rows: u32) -> u8 {
    if rows <= 1 {
        return top_alpha;
    }
    let t = y.min(rows - 1) as f32 / (rows - 1) as f32;
    (f32::from(top_alpha) * (1.0 - t)).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
