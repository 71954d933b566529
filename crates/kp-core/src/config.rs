use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{KompresError, Result};

pub const DEFAULT_QUALITY: u8 = 80;
pub const DEFAULT_MAX_WIDTH: u32 = 1920;
pub const DEFAULT_MAX_HEIGHT: u32 = 1080;
pub const DEFAULT_FPS: u32 = 30;

/// Settings for one compression request.
///
/// Fields are private: a value is built once, through [`Default`] or
/// [`CompressionSettings::from_overrides`], and only read afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionSettings {
    quality: u8,
    max_width: u32,
    max_height: u32,
    fps: u32,
    bitrate: Option<u32>,
    remove_comments: bool,
    remove_whitespace: bool,
    minify_keys: bool,
}

impl CompressionSettings {
    /// Merge `overrides` onto the defaults and validate the result.
    pub fn from_overrides(overrides: &SettingsOverrides) -> Result<Self> {
        let d = Self::default();
        let settings = Self {
            quality: overrides.quality.unwrap_or(d.quality),
            max_width: overrides.max_width.unwrap_or(d.max_width),
            max_height: overrides.max_height.unwrap_or(d.max_height),
            fps: overrides.fps.unwrap_or(d.fps),
            bitrate: overrides.bitrate.or(d.bitrate),
            remove_comments: overrides.remove_comments.unwrap_or(d.remove_comments),
            remove_whitespace: overrides.remove_whitespace.unwrap_or(d.remove_whitespace),
            minify_keys: overrides.minify_keys.unwrap_or(d.minify_keys),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Settings with every text pass turned off.
    pub fn passthrough() -> Self {
        Self {
            remove_comments: false,
            remove_whitespace: false,
            minify_keys: false,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.quality > 100 {
            return Err(KompresError::invalid("quality", format!("{} is outside 0..=100", self.quality)));
        }
        if self.max_width == 0 {
            return Err(KompresError::invalid("maxWidth", "must be positive"));
        }
        if self.max_height == 0 {
            return Err(KompresError::invalid("maxHeight", "must be positive"));
        }
        if self.fps == 0 {
            return Err(KompresError::invalid("fps", "must be positive"));
        }
        if self.bitrate == Some(0) {
            return Err(KompresError::invalid("bitrate", "must be positive when set"));
        }
        Ok(())
    }

    pub fn quality(&self) -> u8 { self.quality }
    pub fn max_width(&self) -> u32 { self.max_width }
    pub fn max_height(&self) -> u32 { self.max_height }
    pub fn fps(&self) -> u32 { self.fps }
    pub fn bitrate(&self) -> Option<u32> { self.bitrate }
    pub fn remove_comments(&self) -> bool { self.remove_comments }
    pub fn remove_whitespace(&self) -> bool { self.remove_whitespace }
    pub fn minify_keys(&self) -> bool { self.minify_keys }
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            fps: DEFAULT_FPS,
            bitrate: None,
            remove_comments: true,
            remove_whitespace: true,
            minify_keys: false,
        }
    }
}

/// User-supplied overrides. Unset fields keep their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsOverrides {
    pub quality: Option<u8>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub fps: Option<u32>,
    pub bitrate: Option<u32>,
    pub remove_comments: Option<bool>,
    pub remove_whitespace: Option<bool>,
    pub minify_keys: Option<bool>,
}

impl SettingsOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loaded settings file");
        Self::from_json_str(&raw)
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: SettingsOverrides) -> Self {
        Self {
            quality: other.quality.or(self.quality),
            max_width: other.max_width.or(self.max_width),
            max_height: other.max_height.or(self.max_height),
            fps: other.fps.or(self.fps),
            bitrate: other.bitrate.or(self.bitrate),
            remove_comments: other.remove_comments.or(self.remove_comments),
            remove_whitespace: other.remove_whitespace.or(self.remove_whitespace),
            minify_keys: other.minify_keys.or(self.minify_keys),
        }
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_max_size(mut self, width: u32, height: u32) -> Self {
        self.max_width = Some(width);
        self.max_height = Some(height);
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = Some(fps);
        self
    }

    pub fn with_bitrate(mut self, bitrate: u32) -> Self {
        self.bitrate = Some(bitrate);
        self
    }

    pub fn with_remove_comments(mut self, on: bool) -> Self {
        self.remove_comments = Some(on);
        self
    }

    pub fn with_remove_whitespace(mut self, on: bool) -> Self {
        self.remove_whitespace = Some(on);
        self
    }

    pub fn with_minify_keys(mut self, on: bool) -> Self {
        self.minify_keys = Some(on);
        self
    }

    pub fn build(&self) -> Result<CompressionSettings> {
        CompressionSettings::from_overrides(self)
    }
}
