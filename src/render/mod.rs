//! Compositing pipeline, render cache and the owning [`Renderer`](renderer::Renderer).

pub(crate) mod avatar;
pub(crate) mod cache;
pub(crate) mod compose;
pub(crate) mod cover;
pub(crate) mod encode;
pub(crate) mod renderer;
pub(crate) mod surface;
