use std::path::PathBuf;
use std::time::Duration;

/// Distance of every anchored block (text, avatar, logo) from the canvas edges.
pub const PADDING_PX: u32 = 20;
/// Vertical gap added after each rendered text line, on top of the font size.
pub const LINE_GAP_PX: f32 = 5.0;
/// Width reserved on every wrapped line for emoji glyphs wider than their nominal advance.
pub const WRAP_SAFETY_MARGIN_PX: f32 = 50.0;
/// Opacity of the black gradient at the top row; it fades linearly to 0 at the bottom row.
pub const GRADIENT_TOP_ALPHA: u8 = 160;
/// Default bound of the in-process render cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;
/// Default timeout for remote background/avatar fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Site name used in the "with {author} @ {site}" line.
pub const DEFAULT_SITE_NAME: &str = "totem.org";

/// Locations of the three registry fonts, in glyph-priority order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontPaths {
    /// Primary display font (variable weight, carries the named styles).
    pub primary: PathBuf,
    /// Broad Unicode coverage font used for scripts the primary font lacks.
    pub fallback: PathBuf,
    /// Emoji font.
    pub emoji: PathBuf,
}

impl FontPaths {
    /// Conventional file names inside a single fonts directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            primary: dir.join("Montserrat-VariableFont_wght.ttf"),
            fallback: dir.join("NotoSans-Regular.ttf"),
            emoji: dir.join("NotoEmoji-Regular.ttf"),
        }
    }

    /// Paths in registry priority order.
    pub fn ordered(&self) -> [&PathBuf; 3] {
        [&self.primary, &self.fallback, &self.emoji]
    }
}

impl Default for FontPaths {
    fn default() -> Self {
        Self::in_dir("assets/fonts")
    }
}

/// Construction options for [`crate::Renderer`].
#[derive(Clone, Debug)]
pub struct RendererOpts {
    /// Registry fonts.
    pub fonts: FontPaths,
    /// Optional watermark drawn bottom-left (SVG or raster).
    pub logo: Option<PathBuf>,
    /// Site name printed after the author.
    pub site_name: String,
    /// Maximum number of rendered images kept in memory.
    pub cache_capacity: usize,
    /// Timeout applied to each remote fetch.
    pub fetch_timeout: Duration,
    /// Skip TLS certificate verification (debug deployments only).
    pub insecure_tls: bool,
}

impl Default for RendererOpts {
    fn default() -> Self {
        Self {
            fonts: FontPaths::default(),
            logo: None,
            site_name: DEFAULT_SITE_NAME.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            insecure_tls: false,
        }
    }
}

impl RendererOpts {
    /// Defaults overlaid with `TOTEM_SOCIAL_*` environment variables.
    ///
    /// - `TOTEM_SOCIAL_FONTS_DIR`
    /// - `TOTEM_SOCIAL_LOGO`
    /// - `TOTEM_SOCIAL_SITE_NAME`
    /// - `TOTEM_SOCIAL_CACHE_CAPACITY` (must be > 0)
    /// - `TOTEM_SOCIAL_FETCH_TIMEOUT_MS` (must be > 0)
    /// - `TOTEM_SOCIAL_DEBUG` (`1`/`true` disables TLS verification)
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut opts = Self::default();
        if let Some(dir) = lookup("TOTEM_SOCIAL_FONTS_DIR").filter(|v| !v.is_empty()) {
            opts.fonts = FontPaths::in_dir(dir);
        }
        if let Some(logo) = lookup("TOTEM_SOCIAL_LOGO").filter(|v| !v.is_empty()) {
            opts.logo = Some(PathBuf::from(logo));
        }
        if let Some(site) = lookup("TOTEM_SOCIAL_SITE_NAME").filter(|v| !v.is_empty()) {
            opts.site_name = site;
        }
        if let Some(n) = lookup("TOTEM_SOCIAL_CACHE_CAPACITY")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            opts.cache_capacity = n;
        }
        if let Some(ms) = lookup("TOTEM_SOCIAL_FETCH_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            opts.fetch_timeout = Duration::from_millis(ms);
        }
        if let Some(debug) = lookup("TOTEM_SOCIAL_DEBUG") {
            opts.insecure_tls = matches!(debug.trim(), "1" | "true" | "TRUE" | "yes");
        }
        opts
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
