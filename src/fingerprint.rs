use std::fmt;

use sha2::Digest as _;

use crate::params::ImageParams;

/// Version of the canonical form hashed by [`cache_key`].
///
/// Bumping it changes every key, which invalidates all previously cached renders without
/// touching the stored entries.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// 256-bit fingerprint of an [`ImageParams`], read as an unsigned big-endian integer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Big-endian digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for b in self.0 {
            out.push_str(&format!("{b:02x}"));
        }
        out
    }

    /// Base-10 rendering of the integer value.
    pub fn to_decimal(&self) -> String {
        // Repeated division of the big-endian byte string by 10.
        let mut digits = Vec::with_capacity(78);
        let mut num = self.0.to_vec();
        while num.iter().any(|&b| b != 0) {
            let mut rem = 0u32;
            for b in num.iter_mut() {
                let cur = (rem << 8) | u32::from(*b);
                *b = (cur / 10) as u8;
                rem = cur % 10;
            }
            digits.push(b'0' + rem as u8);
        }
        if digits.is_empty() {
            return "0".to_string();
        }
        digits.reverse();
        String::from_utf8(digits).unwrap_or_default()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal())
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CacheKey({})", self.to_hex())
    }
}

/// Deterministic string hashed by [`cache_key`]: version prefix followed by every field in
/// declaration order.
pub fn canonical_form(params: &ImageParams) -> String {
    let body = serde_json::to_string(params).unwrap_or_else(|_| format!("{params:?}"));
    format!("v{CACHE_FORMAT_VERSION}:{body}")
}

/// Stable fingerprint of `params`, independent of process, platform and hash seeding.
pub fn cache_key(params: &ImageParams) -> CacheKey {
    let digest = sha2::Sha256::digest(canonical_form(params).as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    CacheKey(bytes)
}

#[cfg(test)]
#[path = "../tests/unit/fingerprint.rs"]
mod tests;
