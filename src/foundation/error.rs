/// Crate-wide result alias.
pub type SocialResult<T> = Result<T, SocialError>;

/// Errors raised while preparing or rendering a social preview image.
///
/// Every failure is fatal to the call that produced it: the renderer never retries and never
/// substitutes a placeholder image. Callers (usually the web layer) decide on fallbacks.
#[derive(thiserror::Error, Debug)]
pub enum SocialError {
    /// Invalid caller input (for example a zero-sized canvas).
    #[error("validation error: {0}")]
    Validation(String),

    /// A font file could not be loaded or parsed.
    #[error("font error: {0}")]
    Font(String),

    /// A background, avatar or logo could not be fetched or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// The raster backend rejected a draw or readback.
    #[error("render error: {0}")]
    Render(String),

    /// Any other failure, with its context chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SocialError {
    /// Build a [`SocialError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SocialError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`SocialError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`SocialError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
