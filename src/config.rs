//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::adapters::live::gallery::DEFAULT_EXTENSIONS;
use crate::messages::{ErrorMessages, DEFAULT_FALLBACK_MESSAGE};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Gallery directory settings.
    #[serde(default)]
    pub gallery: GalleryConfig,

    /// Remote image settings.
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Defaults for the saved avatar (CLI flags take precedence).
    #[serde(default)]
    pub avatar: AvatarConfig,

    /// User-facing messages.
    #[serde(default)]
    pub messages: MessagesConfig,
}

/// Gallery directory settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Directory to pick images from.
    pub dir: Option<PathBuf>,
    /// File extensions treated as images.
    pub extensions: Vec<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self { dir: None, extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect() }
    }
}

/// Remote image settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// URL to download the image from.
    pub url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self { url: None, timeout_secs: 30 }
    }
}

/// Defaults for the saved avatar.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Edge length of the square avatar in pixels; `0` keeps the original.
    pub size: u32,
    /// Output format (`"jpeg"`, `"png"`, `"webp"`).
    pub format: String,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self { size: 256, format: "png".to_string() }
    }
}

/// User-facing message settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Message for failures without a dedicated one.
    pub fallback: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self { fallback: DEFAULT_FALLBACK_MESSAGE.to_string() }
    }
}

/// Where images come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Newest image in a local directory.
    Gallery(PathBuf),
    /// Image downloaded from a URL.
    Remote(String),
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Decide the image source.
    ///
    /// Order: `--url`, `--gallery`, `AVATAR_IMAGE_URL`, `AVATAR_GALLERY_DIR`,
    /// `remote.url`, `gallery.dir`, then `~/Pictures`.
    #[must_use]
    pub fn resolve_source(&self, cli_url: Option<&str>, cli_gallery: Option<&Path>) -> ImageSource {
        self.pick_source(
            cli_url,
            cli_gallery,
            std::env::var("AVATAR_IMAGE_URL").ok(),
            std::env::var_os("AVATAR_GALLERY_DIR").map(PathBuf::from),
        )
    }

    fn pick_source(
        &self,
        cli_url: Option<&str>,
        cli_gallery: Option<&Path>,
        env_url: Option<String>,
        env_gallery: Option<PathBuf>,
    ) -> ImageSource {
        if let Some(url) = cli_url {
            return ImageSource::Remote(url.to_string());
        }
        if let Some(dir) = cli_gallery {
            return ImageSource::Gallery(dir.to_path_buf());
        }
        if let Some(url) = env_url {
            return ImageSource::Remote(url);
        }
        if let Some(dir) = env_gallery {
            return ImageSource::Gallery(dir);
        }
        if let Some(url) = &self.remote.url {
            return ImageSource::Remote(url.clone());
        }
        ImageSource::Gallery(self.gallery.dir.clone().unwrap_or_else(default_gallery_dir))
    }

    /// Error messages with the configured fallback.
    #[must_use]
    pub fn error_messages(&self) -> ErrorMessages {
        ErrorMessages::with_fallback(self.messages.fallback.clone())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `AVATAR_CONFIG` environment variable
/// 3. `~/.config/avatar/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("AVATAR_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/avatar/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/avatar/config.toml")
    } else {
        PathBuf::from("avatar.toml")
    }
}

fn default_gallery_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join("Pictures")
    } else {
        PathBuf::from("Pictures")
    }
}
