use crate::text::{
    face::{FontFace, FontStyle},
    registry::FontRegistry,
    wrap::line_advance,
};

/// Maximal slice of a string whose chars all resolve to the same registry face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextRun<'a> {
    /// Registry index of the face drawing this run.
    pub face: usize,
    pub text: &'a str,
}

/// Split `text` into runs by resolved face.
///
/// Every char (spaces included) stays in order; a boundary is placed only where the resolved
/// face changes.
pub fn split_runs<'a>(registry: &FontRegistry, text: &'a str) -> Vec<TextRun<'a>> {
    let mut runs: Vec<TextRun<'a>> = Vec::new();
    let mut start = 0usize;
    let mut current: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        let face = registry.resolve(ch);
        match current {
            Some(f) if f == face => {}
            Some(f) => {
                runs.push(TextRun {
                    face: f,
                    text: &text[start..i],
                });
                start = i;
                current = Some(face);
            }
            None => current = Some(face),
        }
    }
    if let Some(f) = current {
        runs.push(TextRun {
            face: f,
            text: &text[start..],
        });
    }
    runs
}

/// Requested style if the face supports it, otherwise the face default.
fn effective_style(face: &dyn FontFace, style: FontStyle) -> Option<FontStyle> {
    if face.supports_style(style) {
        Some(style)
    } else {
        tracing::trace!(family = face.family(), style = style.name(), "style unavailable");
        None
    }
}

/// Width of `text` rendered run by run.
pub fn measure_mixed(registry: &FontRegistry, text: &str, size_px: f32, style: FontStyle) -> f32 {
    split_runs(registry, text)
        .into_iter()
        .map(|run| {
            let face = registry.face(run.face);
            face.measure(run.text, size_px, effective_style(face, style))
        })
        .sum()
}

/// Draw `text` top-left anchored at `origin`, one run after another with no gap.
///
/// Returns the total advance.
pub fn draw_mixed(
    registry: &FontRegistry,
    ctx: &mut vello_cpu::RenderContext,
    text: &str,
    origin: (f32, f32),
    size_px: f32,
    style: FontStyle,
) -> f32 {
    let mut x = origin.0;
    for run in split_runs(registry, text) {
        let face = registry.face(run.face);
        let style = effective_style(face, style);
        face.draw(ctx, run.text, (x, origin.1), size_px, style);
        x += face.measure(run.text, size_px, style);
    }
    x - origin.0
}

/// Draw each `\n`-separated line of `text` below the previous one.
///
/// Returns the y coordinate following the last line.
pub fn draw_multiline(
    registry: &FontRegistry,
    ctx: &mut vello_cpu::RenderContext,
    text: &str,
    origin: (f32, f32),
    size_px: f32,
    style: FontStyle,
) -> f32 {
    let mut y = origin.1;
    for line in text.split('\n') {
        draw_mixed(registry, ctx, line, (origin.0, y), size_px, style);
        y += line_advance(size_px);
    }
    y
}

#[cfg(test)]
#[path = "../../tests/unit/text/runs.rs"]
mod tests;
