use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use skrifa::MetadataProvider as _;
use skrifa::instance::{LocationRef, NormalizedCoord, Size};
use skrifa::string::StringId;

use crate::foundation::error::{SocialError, SocialResult};

/// Named style variations the compositor asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    SemiBold,
}

impl FontStyle {
    /// Subfamily name of the matching named instance in a variable font.
    pub fn name(self) -> &'static str {
        match self {
            FontStyle::Regular => "Regular",
            FontStyle::SemiBold => "SemiBold",
        }
    }
}

/// A loaded font as seen by layout and drawing.
///
/// `style` arguments are `None` when the face lacks the requested variation; implementations
/// then use their default instance. Callers check [`FontFace::supports_style`] first.
pub trait FontFace: Send + Sync {
    /// Family name, for diagnostics.
    fn family(&self) -> &str;

    /// Whether the character map contains `ch`.
    fn covers(&self, ch: char) -> bool;

    /// Whether the face exposes the named style variation.
    fn supports_style(&self, style: FontStyle) -> bool;

    /// Horizontal advance of `text` at `size_px`.
    fn measure(&self, text: &str, size_px: f32, style: Option<FontStyle>) -> f32;

    /// Distance from the top of the line box to the baseline.
    fn ascent(&self, size_px: f32, style: Option<FontStyle>) -> f32;

    /// Fill `text` with the current paint, top-left anchored at `origin`.
    fn draw(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: (f32, f32),
        size_px: f32,
        style: Option<FontStyle>,
    );
}

/// An OpenType/TrueType face read with `skrifa` and drawn through `vello_cpu`.
///
/// Layout is advance-based: each char maps through the cmap to one glyph and glyphs are placed
/// by their horizontal advances at the selected variation location. Chars missing from the cmap
/// map to `.notdef`.
pub struct OutlineFace {
    path: PathBuf,
    bytes: Arc<Vec<u8>>,
    font: vello_cpu::peniko::FontData,
    family: String,
    instances: Vec<NamedStyle>,
}

struct NamedStyle {
    name: String,
    coords: Vec<NormalizedCoord>,
}

impl OutlineFace {
    /// Read and parse a font file.
    #[tracing::instrument(level = "debug")]
    pub fn load(path: &Path) -> SocialResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))
            .map_err(|e| SocialError::font(format!("{e:#}")))?;
        Self::from_bytes(path, bytes)
    }

    /// Parse font bytes; `path` is kept as the registry label.
    pub fn from_bytes(path: &Path, bytes: Vec<u8>) -> SocialResult<Self> {
        let font_ref = skrifa::FontRef::new(&bytes).map_err(|e| {
            SocialError::font(format!("parse font '{}': {e}", path.display()))
        })?;

        let family = font_ref
            .localized_strings(StringId::FAMILY_NAME)
            .english_or_first()
            .map(|s| s.chars().collect::<String>())
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "unknown".to_string());

        let instances = font_ref
            .named_instances()
            .iter()
            .filter_map(|inst| {
                let name = font_ref
                    .localized_strings(inst.subfamily_name_id())
                    .english_or_first()?
                    .chars()
                    .collect::<String>();
                Some(NamedStyle {
                    name,
                    coords: inst.location().coords().to_vec(),
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            path = %path.display(),
            family = %family,
            named_styles = instances.len(),
            "parsed font"
        );

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.clone()),
            0,
        );

        Ok(Self {
            path: path.to_path_buf(),
            bytes: Arc::new(bytes),
            font,
            family,
            instances,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw font file bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Subfamily names of the named instances, in font order.
    pub fn style_names(&self) -> impl Iterator<Item = &str> {
        self.instances.iter().map(|i| i.name.as_str())
    }

    fn font_ref(&self) -> Option<skrifa::FontRef<'_>> {
        skrifa::FontRef::new(self.bytes.as_slice()).ok()
    }

    fn coords(&self, style: Option<FontStyle>) -> &[NormalizedCoord] {
        let Some(style) = style else {
            return &[];
        };
        self.instances
            .iter()
            .find(|i| i.name.eq_ignore_ascii_case(style.name()))
            .map(|i| i.coords.as_slice())
            .unwrap_or(&[])
    }

    fn layout_glyphs(
        &self,
        text: &str,
        size_px: f32,
        style: Option<FontStyle>,
    ) -> (Vec<vello_cpu::Glyph>, f32) {
        let Some(font_ref) = self.font_ref() else {
            return (Vec::new(), 0.0);
        };
        let location = LocationRef::new(self.coords(style));
        let charmap = font_ref.charmap();
        let metrics = font_ref.glyph_metrics(Size::new(size_px), location);

        let mut x = 0.0f32;
        let mut glyphs = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let gid = charmap.map(ch).unwrap_or(skrifa::GlyphId::NOTDEF);
            glyphs.push(vello_cpu::Glyph {
                id: gid.to_u32(),
                x,
                y: 0.0,
            });
            x += metrics.advance_width(gid).unwrap_or(0.0);
        }
        (glyphs, x)
    }
}

impl FontFace for OutlineFace {
    fn family(&self) -> &str {
        &self.family
    }

    fn covers(&self, ch: char) -> bool {
        self.font_ref()
            .is_some_and(|f| f.charmap().map(ch).is_some())
    }

    fn supports_style(&self, style: FontStyle) -> bool {
        self.instances
            .iter()
            .any(|i| i.name.eq_ignore_ascii_case(style.name()))
    }

    fn measure(&self, text: &str, size_px: f32, style: Option<FontStyle>) -> f32 {
        self.layout_glyphs(text, size_px, style).1
    }

    fn ascent(&self, size_px: f32, style: Option<FontStyle>) -> f32 {
        match self.font_ref() {
            Some(f) => {
                f.metrics(Size::new(size_px), LocationRef::new(self.coords(style)))
                    .ascent
            }
            None => size_px * 0.8,
        }
    }

    fn draw(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: (f32, f32),
        size_px: f32,
        style: Option<FontStyle>,
    ) {
        let (glyphs, _) = self.layout_glyphs(text, size_px, style);
        if glyphs.is_empty() {
            return;
        }
        let baseline = origin.1 + self.ascent(size_px, style);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(origin.0),
            f64::from(baseline),
        )));

        let coords = self
            .coords(style)
            .iter()
            .map(|c| c.to_bits())
            .collect::<Vec<i16>>();
        let mut run = ctx.glyph_run(&self.font).font_size(size_px);
        if !coords.is_empty() {
            run = run.normalized_coords(&coords);
        }
        run.fill_glyphs(glyphs.into_iter());
    }
}
