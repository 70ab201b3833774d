#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use totem_social::{
    FontEntry, FontFace, FontRegistry, FontStyle, ImageFetcher, SocialError, SocialResult,
};

/// Draws a filled box per non-space char; covers chars accepted by `covers`.
pub struct BoxFace {
    pub family: &'static str,
    pub covers: fn(char) -> bool,
    pub advance_em: f32,
    pub bold: bool,
}

impl FontFace for BoxFace {
    fn family(&self) -> &str {
        self.family
    }

    fn covers(&self, ch: char) -> bool {
        (self.covers)(ch)
    }

    fn supports_style(&self, style: FontStyle) -> bool {
        self.bold || style == FontStyle::Regular
    }

    fn measure(&self, text: &str, size_px: f32, _style: Option<FontStyle>) -> f32 {
        text.chars().count() as f32 * self.advance_em * size_px
    }

    fn ascent(&self, size_px: f32, _style: Option<FontStyle>) -> f32 {
        size_px * 0.8
    }

    fn draw(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: (f32, f32),
        size_px: f32,
        _style: Option<FontStyle>,
    ) {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        let adv = f64::from(self.advance_em * size_px);
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x0 = f64::from(origin.0) + adv * i as f64;
            let y0 = f64::from(origin.1);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                x0,
                y0,
                x0 + adv * 0.8,
                y0 + f64::from(size_px) * 0.8,
            ));
        }
    }
}

pub fn registry() -> FontRegistry {
    let entry = |face: BoxFace| FontEntry {
        path: format!("mem://{}", face.family),
        face: Arc::new(face),
    };
    FontRegistry::from_entries(vec![
        entry(BoxFace {
            family: "primary",
            covers: |c| c.is_ascii(),
            advance_em: 0.55,
            bold: true,
        }),
        entry(BoxFace {
            family: "fallback",
            covers: |c| !c.is_ascii() && (c as u32) < 0x1F000,
            advance_em: 1.0,
            bold: false,
        }),
        entry(BoxFace {
            family: "emoji",
            covers: |c| (c as u32) >= 0x1F000,
            advance_em: 1.2,
            bold: false,
        }),
    ])
    .unwrap()
}

pub fn png(w: u32, h: u32, rgb: [u8; 3]) -> Vec<u8> {
    totem_social::encode_png(&image::RgbImage::from_pixel(w, h, image::Rgb(rgb))).unwrap()
}

/// In-memory fetcher that counts calls.
#[derive(Default)]
pub struct MemFetcher {
    files: HashMap<String, Vec<u8>>,
    calls: AtomicUsize,
}

impl MemFetcher {
    pub fn with(mut self, location: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(location.to_string(), bytes);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageFetcher for MemFetcher {
    fn fetch(&self, location: &str) -> SocialResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(location)
            .cloned()
            .ok_or_else(|| SocialError::asset(format!("not found: {location}")))
    }
}

/// Fetcher with a landscape background, a portrait background and a green avatar.
pub fn fixtures() -> Arc<MemFetcher> {
    Arc::new(
        MemFetcher::default()
            .with("wide.png", png(160, 90, [70, 110, 160]))
            .with("tall.png", png(60, 140, [160, 110, 70]))
            .with("avatar.png", png(30, 30, [0, 220, 0])),
    )
}
