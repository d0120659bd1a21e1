//! Configuration system
//!
//! Session configuration is plain data: everything except the window handle,
//! which is borrowed separately for the session's lifetime. It can be built in
//! code or loaded from a `.toml` / `.ron` file through the [`Config`] trait.

use std::ffi::OsStr;
use std::path::Path;

pub use serde::{Serialize, Deserialize};

use crate::foundation::Extent;
use crate::resolve::resolve_extent;

/// On-disk configuration format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Format for `path`, matching the extension case-insensitively
    ///
    /// # Errors
    /// [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(OsStr::to_str) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn parse<T: for<'de> Deserialize<'de>>(self, contents: &str) -> Result<T, ConfigError> {
        match self {
            Self::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Self::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    fn render<T: Serialize>(self, value: &T) -> Result<String, ConfigError> {
        let rendered = match self {
            Self::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
                .map_err(|e| e.to_string()),
        };
        rendered.map_err(ConfigError::Serialize)
    }
}

/// Configuration trait
///
/// Loading and saving dispatch on [`ConfigFormat::from_path`]; an unsupported
/// extension is rejected before the file is touched.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        format.parse(&contents)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = ConfigFormat::from_path(path)?.render(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// File contents are not a valid configuration
    #[error("invalid glue configuration: {0}")]
    Parse(String),

    /// Configuration could not be written in the requested format
    #[error("cannot serialize glue configuration: {0}")]
    Serialize(String),

    /// Extension is neither `.toml` nor `.ron`
    #[error("unsupported config format (expected .toml or .ron): {0}")]
    UnsupportedFormat(String),
}

/// # Back-buffer Sizing Policy
///
/// Constrains the swapchain's allocated size relative to the window's live
/// framebuffer size. A minimum of 0 means "unconstrained, use the window size".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackbufferPolicy {
    /// Smallest back-buffer width to allocate
    pub min_width: u32,
    /// Smallest back-buffer height to allocate
    pub min_height: u32,
    /// Grow the back-buffer when needed but never shrink it
    pub never_downsize: bool,
}

impl BackbufferPolicy {
    /// Back-buffer tracks the window exactly
    #[must_use]
    pub const fn exact_fit() -> Self {
        Self {
            min_width: 0,
            min_height: 0,
            never_downsize: false,
        }
    }

    /// Back-buffer is at least as large as `monitor_size` and never shrinks
    ///
    /// Pass the result of [`crate::window::max_monitor_size`] to keep rendering
    /// smooth while the window is resized or dragged between monitors.
    #[must_use]
    pub const fn covering_monitors(monitor_size: Extent) -> Self {
        Self {
            min_width: monitor_size.width,
            min_height: monitor_size.height,
            never_downsize: true,
        }
    }

    /// Minimum size as an extent
    #[must_use]
    pub const fn min_size(&self) -> Extent {
        Extent::new(self.min_width, self.min_height)
    }

    /// Target back-buffer size for a frame
    #[must_use]
    pub const fn resolve(&self, current: Extent, requested: Extent) -> Extent {
        resolve_extent(current, requested, self.min_size(), self.never_downsize)
    }
}

/// # Glue Session Configuration
///
/// Set once at [`crate::Session::environment_setup`]. Only `vsync_disabled`
/// changes afterwards, through [`crate::Session::toggle_vsync`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlueConfig {
    /// Back-buffer sizing policy
    pub backbuffer: BackbufferPolicy,
    /// Present without waiting for vertical blank
    pub vsync_disabled: bool,
    /// Enable the native debug layer (`None` = debug builds only)
    pub debug_layer: Option<bool>,
}

impl GlueConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the back-buffer sizing policy
    #[must_use]
    pub fn with_backbuffer(mut self, policy: BackbufferPolicy) -> Self {
        self.backbuffer = policy;
        self
    }

    /// Set the minimum back-buffer size
    #[must_use]
    pub fn with_min_size(mut self, width: u32, height: u32) -> Self {
        self.backbuffer.min_width = width;
        self.backbuffer.min_height = height;
        self
    }

    /// Refuse to shrink the back-buffer
    #[must_use]
    pub fn with_never_downsize(mut self, never_downsize: bool) -> Self {
        self.backbuffer.never_downsize = never_downsize;
        self
    }

    /// Start with vsync disabled
    #[must_use]
    pub fn with_vsync_disabled(mut self, disabled: bool) -> Self {
        self.vsync_disabled = disabled;
        self
    }

    /// Force the native debug layer on or off
    #[must_use]
    pub fn with_debug_layer(mut self, enabled: bool) -> Self {
        self.debug_layer = Some(enabled);
        self
    }

    /// Whether the native debug layer should be requested
    #[must_use]
    pub fn debug_layer_enabled(&self) -> bool {
        self.debug_layer.unwrap_or(cfg!(debug_assertions))
    }
}

impl Config for GlueConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unconstrained() {
        let config = GlueConfig::default();
        assert_eq!(config.backbuffer, BackbufferPolicy::exact_fit());
        assert!(!config.vsync_disabled);
        assert_eq!(config.debug_layer_enabled(), cfg!(debug_assertions));
    }

    #[test]
    fn test_covering_monitors_policy() {
        let policy = BackbufferPolicy::covering_monitors(Extent::new(3840, 2160));
        assert_eq!(policy.min_size(), Extent::new(3840, 2160));
        assert!(policy.never_downsize);
        assert_eq!(
            policy.resolve(Extent::new(3840, 2160), Extent::new(800, 600)),
            Extent::new(3840, 2160)
        );
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = GlueConfig::new()
            .with_min_size(1280, 720)
            .with_never_downsize(true)
            .with_vsync_disabled(true)
            .with_debug_layer(false);

        assert_eq!(config.backbuffer.min_width, 1280);
        assert_eq!(config.backbuffer.min_height, 720);
        assert!(config.backbuffer.never_downsize);
        assert!(config.vsync_disabled);
        assert!(!config.debug_layer_enabled());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GlueConfig = toml::from_str(
            "vsync_disabled = true\n\n[backbuffer]\nnever_downsize = true\n",
        )
        .unwrap();

        assert!(config.vsync_disabled);
        assert!(config.backbuffer.never_downsize);
        assert_eq!(config.backbuffer.min_width, 0);
        assert_eq!(config.debug_layer, None);
    }

    #[test]
    fn test_ron_file_round_trip() {
        let path = std::env::temp_dir().join(format!("swapchain_glue_{}.ron", std::process::id()));
        let path = path.to_str().unwrap();

        let config = GlueConfig::new().with_min_size(1920, 1080).with_never_downsize(true);
        config.save_to_file(path).unwrap();
        let loaded = GlueConfig::load_from_file(path).unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = GlueConfig::default().save_to_file("glue.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_format_is_checked_before_reading() {
        // The file does not exist; the extension is rejected first.
        let err = GlueConfig::load_from_file("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));

        let err = GlueConfig::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path("glue.toml").unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path("conf/Glue.RON").unwrap(), ConfigFormat::Ron);
        assert!(ConfigFormat::from_path("glue").is_err());
        assert!(ConfigFormat::from_path("toml").is_err());
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let err = ConfigFormat::Toml
            .parse::<GlueConfig>("vsync_disabled = \"sometimes\"")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
