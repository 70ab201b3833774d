//! Fonts, word-wrap and mixed-font run rendering.

pub(crate) mod face;
pub(crate) mod registry;
pub(crate) mod runs;
pub(crate) mod wrap;
