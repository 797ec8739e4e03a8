//! Gallery configuration: repository coordinates, proxy settings, and
//! playback timing.
//!
//! Defaults match the deployed gallery; overrides arrive as a JSON document
//! (browser) or as CLI flags.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

pub const DEFAULT_REPO_OWNER: &str = "ecwgrpmkt-stack";
pub const DEFAULT_REPO_NAME: &str = "360_gallery";
pub const DEFAULT_IMAGE_FOLDER: &str = "images";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_CDN_BASE: &str = "https://cdn.jsdelivr.net/gh";
pub const DEFAULT_PROXY_BASE: &str = "https://wsrv.nl/";
pub const DEFAULT_PROXY_MAX_DIMENSION: u32 = 8000;
pub const DEFAULT_PROXY_QUALITY: u8 = 85;
pub const DEFAULT_PROXY_FORMAT: &str = "webp";
pub const DEFAULT_FALLBACK_COUNT: usize = 20;
pub const DEFAULT_HIDDEN_PREFIX: &str = "hidden_";

pub const DEFAULT_ATTRACT_DELAY_MS: u32 = 3_000;
pub const DEFAULT_ADVANCE_DELAY_MS: u32 = 60_000;
pub const DEFAULT_FADE_DELAY_MS: u32 = 400;
pub const DEFAULT_ATTRACT_TRANSITION_MS: u32 = 1_000;
pub const DEFAULT_AUTO_ROTATE_SPEED: f64 = -2.0;

/// Where the images live and how their display URLs are built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub repo_owner: String,
    pub repo_name: String,
    pub image_folder: String,
    pub api_base: String,
    pub cdn_base: String,
    pub proxy_base: String,
    /// Longest edge requested from the resizing proxy.
    pub proxy_max_dimension: u32,
    pub proxy_quality: u8,
    pub proxy_format: String,
    /// Length of the synthetic `img1..imgN` list used when the listing fails.
    pub fallback_count: usize,
    pub hidden_prefix: String,
    /// Lower-case extensions without the dot.
    pub image_extensions: Vec<String>,
    pub playback: PlaybackConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            repo_owner: DEFAULT_REPO_OWNER.to_owned(),
            repo_name: DEFAULT_REPO_NAME.to_owned(),
            image_folder: DEFAULT_IMAGE_FOLDER.to_owned(),
            api_base: DEFAULT_API_BASE.to_owned(),
            cdn_base: DEFAULT_CDN_BASE.to_owned(),
            proxy_base: DEFAULT_PROXY_BASE.to_owned(),
            proxy_max_dimension: DEFAULT_PROXY_MAX_DIMENSION,
            proxy_quality: DEFAULT_PROXY_QUALITY,
            proxy_format: DEFAULT_PROXY_FORMAT.to_owned(),
            fallback_count: DEFAULT_FALLBACK_COUNT,
            hidden_prefix: DEFAULT_HIDDEN_PREFIX.to_owned(),
            image_extensions: vec!["jpg".to_owned(), "jpeg".to_owned(), "png".to_owned()],
            playback: PlaybackConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Parse an override document. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` if the JSON is malformed or fails [`Self::validate`].
    pub fn from_json(raw: &str) -> Result<Self, GalleryError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| GalleryError::Precondition(format!("config parse failed: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a usable listing.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` naming the first offending field.
    pub fn validate(&self) -> Result<(), GalleryError> {
        let required = [
            ("repo_owner", &self.repo_owner),
            ("repo_name", &self.repo_name),
            ("api_base", &self.api_base),
            ("cdn_base", &self.cdn_base),
            ("proxy_base", &self.proxy_base),
            ("hidden_prefix", &self.hidden_prefix),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(GalleryError::Precondition(format!("{field} must not be empty")));
            }
        }
        if self.proxy_max_dimension == 0 {
            return Err(GalleryError::Precondition("proxy_max_dimension must be positive".into()));
        }
        if self.image_extensions.is_empty() {
            return Err(GalleryError::Precondition("image_extensions must not be empty".into()));
        }
        self.playback.validate()
    }

    /// Repository path of a file inside the image folder.
    #[must_use]
    pub fn folder_path(&self, file_name: &str) -> String {
        let folder = self.image_folder.trim_matches('/');
        if folder.is_empty() { file_name.to_owned() } else { format!("{folder}/{file_name}") }
    }
}

/// Idle and transition timing for the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Inactivity before the "come back" cue and attract rotation.
    pub attract_delay_ms: u32,
    /// Inactivity before advancing to the next image.
    pub advance_delay_ms: u32,
    /// Time the fade overlay stays opaque before the next scene is built.
    pub fade_delay_ms: u32,
    /// Duration of the zoom-out and pitch-level animation in attract mode.
    pub attract_transition_ms: u32,
    /// Degrees per second; negative rotates left.
    pub auto_rotate_speed: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            attract_delay_ms: DEFAULT_ATTRACT_DELAY_MS,
            advance_delay_ms: DEFAULT_ADVANCE_DELAY_MS,
            fade_delay_ms: DEFAULT_FADE_DELAY_MS,
            attract_transition_ms: DEFAULT_ATTRACT_TRANSITION_MS,
            auto_rotate_speed: DEFAULT_AUTO_ROTATE_SPEED,
        }
    }
}

impl PlaybackConfig {
    /// # Errors
    ///
    /// Returns `Precondition` if either idle delay is zero or the attract
    /// delay is not shorter than the advance delay.
    pub fn validate(&self) -> Result<(), GalleryError> {
        if self.attract_delay_ms == 0 || self.advance_delay_ms == 0 {
            return Err(GalleryError::Precondition("idle delays must be positive".into()));
        }
        if self.attract_delay_ms >= self.advance_delay_ms {
            return Err(GalleryError::Precondition("attract_delay_ms must be shorter than advance_delay_ms".into()));
        }
        Ok(())
    }
}
