use crate::{
    assets::logo::Logo,
    foundation::{
        config::{GRADIENT_TOP_ALPHA, PADDING_PX},
        error::{SocialError, SocialResult},
    },
    params::ImageParams,
    render::{avatar::circular_avatar, cover::resize_to_cover, surface::Surface},
    text::{
        face::FontStyle,
        registry::FontRegistry,
        runs::{draw_multiline, measure_mixed},
        wrap::{line_advance, wrap_text},
    },
};

/// Decoded inputs for one composition. Fetching happens before this point.
pub struct ComposeInputs<'a> {
    pub params: &'a ImageParams,
    pub background: &'a image::DynamicImage,
    /// Avatar photo; drawn only when `params.include_avatar` is set.
    pub avatar: Option<&'a image::DynamicImage>,
    pub logo: Option<&'a Logo>,
    pub site_name: &'a str,
}

/// A block of text at its final position. `text` may contain `\n`.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size_px: f32,
    pub style: FontStyle,
}

/// Font sizes and spacing derived from the canvas width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    pub title: f32,
    pub subtitle: f32,
    pub meta: f32,
    pub time: f32,
    pub block_gap: f32,
}

impl TextMetrics {
    pub fn for_width(width: u32) -> Self {
        let w = width as f32;
        Self {
            title: w / 10.0,
            subtitle: w / 20.0,
            meta: w / 30.0,
            time: w / 18.0,
            block_gap: w / 30.0,
        }
    }
}

/// Avatar diameter for a canvas.
pub fn avatar_diameter(width: u32, height: u32) -> u32 {
    (width.min(height) / 5).max(1)
}

/// Logo height for a canvas.
pub fn logo_height(width: u32) -> u32 {
    (width / 12).max(1)
}

/// Position every text block, top-left anchored at the padding.
///
/// Title and subtitle are word-wrapped. Below them comes either the meta line alone or the
/// `with {author} @ {site}` line followed by day, PST and EST lines. Blank lines are skipped,
/// including the `with` line when `author_name` is blank, so no dangling `with  @ site` is drawn.
pub fn layout_text(registry: &FontRegistry, params: &ImageParams, site_name: &str) -> Vec<PlacedText> {
    let m = TextMetrics::for_width(params.width);
    let x = PADDING_PX as f32;
    let max_width = params.width.saturating_sub(PADDING_PX) as f32;
    let mut y = PADDING_PX as f32;
    let mut out = Vec::new();

    let mut wrapped_block = |text: &str, size: f32, style: FontStyle, y: &mut f32| {
        let lines = wrap_text(text, max_width, |s| measure_mixed(registry, s, size, style));
        if lines.is_empty() {
            return;
        }
        let count = lines.len();
        out.push(PlacedText {
            text: lines.join("\n"),
            x,
            y: *y,
            size_px: size,
            style,
        });
        *y += line_advance(size) * count as f32 + m.block_gap;
    };

    wrapped_block(&params.title, m.title, FontStyle::SemiBold, &mut y);
    wrapped_block(&params.subtitle, m.subtitle, FontStyle::Regular, &mut y);

    let mut single = |text: &str, size: f32, style: FontStyle, y: &mut f32| {
        if text.trim().is_empty() {
            return;
        }
        out.push(PlacedText {
            text: text.to_string(),
            x,
            y: *y,
            size_px: size,
            style,
        });
        *y += line_advance(size) * text.split('\n').count() as f32;
    };

    if params.uses_meta_line() {
        single(&params.meta_line, m.meta, FontStyle::Regular, &mut y);
    } else {
        if !params.author_name.trim().is_empty() {
            let with = format!("with {} @ {site_name}", params.author_name.trim());
            single(&with, m.meta, FontStyle::Regular, &mut y);
        }
        for line in [&params.day, &params.time_pst, &params.time_est] {
            single(line, m.time, FontStyle::SemiBold, &mut y);
        }
    }
    out
}

/// Rasterize placed text in white onto a transparent premultiplied layer.
fn draw_text_layer(
    registry: &FontRegistry,
    blocks: &[PlacedText],
    width: u32,
    height: u32,
) -> SocialResult<Vec<u8>> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SocialError::render("canvas width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SocialError::render("canvas height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    for block in blocks {
        draw_multiline(
            registry,
            &mut ctx,
            &block.text,
            (block.x, block.y),
            block.size_px,
            block.style,
        );
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap.data_as_u8_slice().to_vec())
}

/// Run the full composition: cover, gradient, text, avatar, logo, RGB conversion.
#[tracing::instrument(level = "debug", skip_all, fields(w = inputs.params.width, h = inputs.params.height))]
pub fn compose(registry: &FontRegistry, inputs: &ComposeInputs<'_>) -> SocialResult<image::RgbImage> {
    let params = inputs.params;
    params.validate()?;
    let (w, h) = (params.width, params.height);

    let mut surface = Surface::from_rgba(resize_to_cover(inputs.background, w, h));
    surface.apply_vertical_gradient(GRADIENT_TOP_ALPHA);

    let blocks = layout_text(registry, params, inputs.site_name);
    let layer = draw_text_layer(registry, &blocks, w, h)?;
    surface.over_layer(&layer)?;

    if params.include_avatar {
        let photo = inputs
            .avatar
            .ok_or_else(|| SocialError::asset("avatar requested but no avatar image given"))?;
        let d = avatar_diameter(w, h);
        let patch = circular_avatar(photo, d);
        let x = i64::from(w) - i64::from(PADDING_PX) - i64::from(d);
        let y = i64::from(h) - i64::from(PADDING_PX) - i64::from(d);
        surface.over_patch(&patch, x, y);
    }

    if let Some(logo) = inputs.logo {
        let patch = logo.rasterize(logo_height(w))?;
        let y = i64::from(h) - i64::from(PADDING_PX) - i64::from(patch.height);
        surface.over_patch(&patch, i64::from(PADDING_PX), y);
    }

    surface.into_rgb()
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
