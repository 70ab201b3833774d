use std::sync::Arc;

use crate::{
    foundation::{
        config::FontPaths,
        error::{SocialError, SocialResult},
    },
    text::face::{FontFace, OutlineFace},
};

/// Number of faces in a registry: primary, broad-coverage fallback, emoji.
pub const REGISTRY_LEN: usize = 3;

/// Index of the primary face; also the face that draws uncovered chars as `.notdef`.
pub const PRIMARY_FACE: usize = 0;

/// One registered face and the path (or label) it was loaded from.
#[derive(Clone)]
pub struct FontEntry {
    pub path: String,
    pub face: Arc<dyn FontFace>,
}

impl std::fmt::Debug for FontEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontEntry")
            .field("path", &self.path)
            .field("family", &self.face.family())
            .finish()
    }
}

/// Immutable, ordered set of faces used for glyph fallback.
///
/// Built once at startup and shared read-only by every render.
#[derive(Clone, Debug)]
pub struct FontRegistry {
    entries: Vec<FontEntry>,
}

impl FontRegistry {
    /// Load the three registry fonts. Any missing or unparsable file fails construction.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn load(paths: &FontPaths) -> SocialResult<Self> {
        let mut entries = Vec::with_capacity(REGISTRY_LEN);
        for path in paths.ordered() {
            let face = OutlineFace::load(path)?;
            entries.push(FontEntry {
                path: path.display().to_string(),
                face: Arc::new(face),
            });
        }
        Self::from_entries(entries)
    }

    /// Build a registry from already-constructed faces, in priority order.
    pub fn from_entries(entries: Vec<FontEntry>) -> SocialResult<Self> {
        if entries.len() != REGISTRY_LEN {
            return Err(SocialError::font(format!(
                "font registry needs exactly {REGISTRY_LEN} faces, got {}",
                entries.len()
            )));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[FontEntry] {
        &self.entries
    }

    pub fn face(&self, index: usize) -> &dyn FontFace {
        self.entries[index.min(self.entries.len() - 1)].face.as_ref()
    }

    /// Index of the first face, in priority order, whose cmap contains `ch`.
    pub fn covering_face(&self, ch: char) -> Option<usize> {
        self.entries.iter().position(|e| e.face.covers(ch))
    }

    /// Face that will draw `ch`: the first covering face, or the primary face (`.notdef`).
    pub fn resolve(&self, ch: char) -> usize {
        self.covering_face(ch).unwrap_or(PRIMARY_FACE)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/registry.rs"]
mod tests;
