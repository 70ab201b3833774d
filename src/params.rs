use crate::foundation::error::{SocialError, SocialResult};

/// Everything that determines a rendered social preview.
///
/// Field declaration order is part of the cache-key format (see [`crate::cache_key`]); append new
/// fields at the end and bump [`crate::CACHE_FORMAT_VERSION`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImageParams {
    /// Local path or http(s) URL of the background photo.
    pub background_path: String,
    /// Local path or http(s) URL of the avatar photo. Only read when `include_avatar` is set.
    pub author_img_path: String,
    pub author_name: String,
    pub title: String,
    pub subtitle: String,
    pub day: String,
    pub time_pst: String,
    pub time_est: String,
    /// When non-empty, replaces the author line and the day/time block.
    pub meta_line: String,
    pub width: u32,
    pub height: u32,
    pub include_avatar: bool,
}

impl Default for ImageParams {
    fn default() -> Self {
        Self {
            background_path: String::new(),
            author_img_path: String::new(),
            author_name: String::new(),
            title: String::new(),
            subtitle: String::new(),
            day: String::new(),
            time_pst: String::new(),
            time_est: String::new(),
            meta_line: String::new(),
            width: SocialFormat::Square.width(),
            height: SocialFormat::Square.height(),
            include_avatar: true,
        }
    }
}

impl ImageParams {
    /// Check the canvas constraints the raster backend relies on.
    pub fn validate(&self) -> SocialResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SocialError::validation(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(SocialError::validation(format!(
                "canvas {}x{} exceeds {}x{}",
                self.width,
                self.height,
                u16::MAX,
                u16::MAX
            )));
        }
        if self.background_path.trim().is_empty() {
            return Err(SocialError::validation("background_path must be non-empty"));
        }
        if self.include_avatar && self.author_img_path.trim().is_empty() {
            return Err(SocialError::validation(
                "author_img_path must be non-empty when include_avatar is set",
            ));
        }
        Ok(())
    }

    /// Whether the single meta line replaces the author/day/time block.
    pub fn uses_meta_line(&self) -> bool {
        !self.meta_line.trim().is_empty()
    }
}

/// Output size presets served under `/social/<format>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialFormat {
    /// 1080×1080, feed posts.
    Square,
    /// 1200×630, Open Graph link previews.
    Landscape,
    /// 1080×1350, tall feed posts.
    Portrait,
    /// 1080×1920, stories.
    Story,
}

impl SocialFormat {
    pub const ALL: [SocialFormat; 4] = [
        SocialFormat::Square,
        SocialFormat::Landscape,
        SocialFormat::Portrait,
        SocialFormat::Story,
    ];

    /// Look up a preset by its URL key. Unknown keys yield `None`; the web layer answers 404.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub fn key(self) -> &'static str {
        match self {
            SocialFormat::Square => "square",
            SocialFormat::Landscape => "landscape",
            SocialFormat::Portrait => "portrait",
            SocialFormat::Story => "story",
        }
    }

    pub fn width(self) -> u32 {
        match self {
            SocialFormat::Square | SocialFormat::Portrait | SocialFormat::Story => 1080,
            SocialFormat::Landscape => 1200,
        }
    }

    pub fn height(self) -> u32 {
        match self {
            SocialFormat::Square => 1080,
            SocialFormat::Landscape => 630,
            SocialFormat::Portrait => 1350,
            SocialFormat::Story => 1920,
        }
    }

    /// Copy `params` with this preset's dimensions.
    pub fn apply(self, params: &ImageParams) -> ImageParams {
        ImageParams {
            width: self.width(),
            height: self.height(),
            ..params.clone()
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/params.rs"]
mod tests;
