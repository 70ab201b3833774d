//! Totem social preview renderer.
//!
//! Turns an [`ImageParams`] record into a fixed-size RGB image: a background photo resized to
//! cover the canvas, a top-to-bottom black gradient, white mixed-font text (title, subtitle and
//! either a meta line or author/day/time lines), an optional circular avatar and an optional
//! logo. Renders are memoized in a bounded LRU keyed by [`cache_key`].
//!
//! - Build a [`Renderer`] once from [`RendererOpts`]
//! - Call [`Renderer::generate_image`] per request
//! - Encode with [`encode_jpeg`] and serve with [`CACHE_CONTROL_HEADER`]
#![forbid(unsafe_code)]

mod assets;
mod fingerprint;
mod foundation;
mod params;
mod render;
mod text;

pub use crate::assets::fetch::{HttpFetcher, ImageFetcher, is_remote};
pub use crate::assets::logo::{Logo, PremulPatch};
pub use crate::fingerprint::{CACHE_FORMAT_VERSION, CacheKey, cache_key, canonical_form};
pub use crate::foundation::config::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_FETCH_TIMEOUT, DEFAULT_SITE_NAME, FontPaths,
    GRADIENT_TOP_ALPHA, LINE_GAP_PX, PADDING_PX, RendererOpts, WRAP_SAFETY_MARGIN_PX,
};
pub use crate::foundation::error::{SocialError, SocialResult};
pub use crate::params::{ImageParams, SocialFormat};
pub use crate::render::cache::{CacheStats, RenderCache};
pub use crate::render::compose::{
    ComposeInputs, PlacedText, TextMetrics, avatar_diameter, compose, layout_text, logo_height,
};
pub use crate::render::cover::resize_to_cover;
pub use crate::render::encode::{
    CACHE_CONTROL_HEADER, DEFAULT_JPEG_QUALITY, encode_jpeg, encode_png,
};
pub use crate::render::renderer::Renderer;
pub use crate::text::face::{FontFace, FontStyle, OutlineFace};
pub use crate::text::registry::{FontEntry, FontRegistry, PRIMARY_FACE, REGISTRY_LEN};
pub use crate::text::runs::{TextRun, draw_mixed, draw_multiline, measure_mixed, split_runs};
pub use crate::text::wrap::{line_advance, wrap_text};
