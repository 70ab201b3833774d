use std::time::Duration;

use anyhow::Context as _;

use crate::foundation::error::{SocialError, SocialResult};

/// Source of raw image bytes for backgrounds and avatars.
pub trait ImageFetcher: Send + Sync {
    /// Fetch the bytes behind `location` (a local path or an http(s) URL).
    fn fetch(&self, location: &str) -> SocialResult<Vec<u8>>;
}

/// Whether `location` should be fetched over HTTP rather than read from disk.
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Fetches URLs with a blocking HTTP client and reads everything else from the filesystem.
///
/// Each request is bounded by the configured timeout; there are no retries.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build the shared client. `insecure_tls` disables certificate verification.
    pub fn new(timeout: Duration, insecure_tls: bool) -> SocialResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .danger_accept_invalid_certs(insecure_tls)
            .build()
            .context("build http client")?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn fetch_remote(&self, url: &str) -> SocialResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| SocialError::asset(format!("fetch '{url}': {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SocialError::asset(format!(
                "fetch '{url}': status {}",
                status.as_u16()
            )));
        }
        let bytes = response
            .bytes()
            .map_err(|e| SocialError::asset(format!("read body of '{url}': {e}")))?;
        Ok(bytes.to_vec())
    }
}

impl ImageFetcher for HttpFetcher {
    #[tracing::instrument(level = "debug", skip(self))]
    fn fetch(&self, location: &str) -> SocialResult<Vec<u8>> {
        let bytes = if is_remote(location) {
            self.fetch_remote(location.trim())?
        } else {
            std::fs::read(location)
                .map_err(|e| SocialError::asset(format!("read '{location}': {e}")))?
        };
        tracing::debug!(len = bytes.len(), "fetched image bytes");
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
