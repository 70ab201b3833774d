use std::sync::Arc;

use crate::{
    assets::{
        decode::decode_image,
        fetch::{HttpFetcher, ImageFetcher},
        logo::Logo,
    },
    fingerprint::cache_key,
    foundation::{config::RendererOpts, error::SocialResult},
    params::ImageParams,
    render::{
        cache::{CacheStats, RenderCache},
        compose::{ComposeInputs, compose},
    },
    text::registry::FontRegistry,
};

/// Owns everything a render needs: fonts, fetcher, optional logo and the render cache.
///
/// Construct once at startup and share (`Renderer` is `Send + Sync`). Concurrent identical
/// requests are not coalesced; each renders and the later insert replaces an equivalent entry.
pub struct Renderer {
    fonts: FontRegistry,
    fetcher: Arc<dyn ImageFetcher>,
    logo: Option<Logo>,
    site_name: String,
    cache: RenderCache,
}

impl Renderer {
    /// Load fonts and logo from `opts` and fetch over HTTP.
    #[tracing::instrument(level = "info", skip_all)]
    pub fn new(opts: &RendererOpts) -> SocialResult<Self> {
        let fonts = FontRegistry::load(&opts.fonts)?;
        let fetcher = HttpFetcher::new(opts.fetch_timeout, opts.insecure_tls)?;
        if opts.insecure_tls {
            tracing::warn!("TLS certificate verification disabled");
        }
        Self::with_parts(fonts, Arc::new(fetcher), opts)
    }

    /// Assemble a renderer from an existing registry and fetcher. The logo, site name and
    /// cache capacity still come from `opts`.
    pub fn with_parts(
        fonts: FontRegistry,
        fetcher: Arc<dyn ImageFetcher>,
        opts: &RendererOpts,
    ) -> SocialResult<Self> {
        let logo = opts.logo.as_deref().map(Logo::load).transpose()?;
        Ok(Self {
            fonts,
            fetcher,
            logo,
            site_name: opts.site_name.clone(),
            cache: RenderCache::new(opts.cache_capacity),
        })
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Memoized render. Failures are returned as-is and never cached.
    #[tracing::instrument(level = "debug", skip_all, fields(w = params.width, h = params.height))]
    pub fn generate_image(&self, params: &ImageParams) -> SocialResult<Arc<image::RgbImage>> {
        let key = cache_key(params);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(key = %key.to_hex(), "render cache hit");
            return Ok(hit);
        }
        tracing::debug!(key = %key.to_hex(), "render cache miss");

        let image = Arc::new(self.render_uncached(params)?);
        self.cache.insert(key, Arc::clone(&image));
        Ok(image)
    }

    /// Fetch inputs and compose, bypassing the cache.
    pub fn render_uncached(&self, params: &ImageParams) -> SocialResult<image::RgbImage> {
        params.validate()?;
        let background = decode_image(&self.fetcher.fetch(&params.background_path)?)?;
        let avatar = if params.include_avatar {
            Some(decode_image(&self.fetcher.fetch(&params.author_img_path)?)?)
        } else {
            None
        };

        compose(
            &self.fonts,
            &ComposeInputs {
                params,
                background: &background,
                avatar: avatar.as_ref(),
                logo: self.logo.as_ref(),
                site_name: &self.site_name,
            },
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
