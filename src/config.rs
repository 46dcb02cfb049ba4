//! Configuration file support for microlabel.
//!
//! Editor thresholds, magic-wand tuning, persistence caching and key
//! bindings are all read from one versioned JSON document.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::keybindings::KeyBindings;
use microlabel_raster::ExtractorSettings;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Editor configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Shape editing thresholds
    #[serde(default)]
    pub tools: ToolSettings,

    /// Magic-wand tuning
    #[serde(default)]
    pub magic_wand: WandSettings,

    /// Annotation fetch caching
    #[serde(default)]
    pub persistence: PersistenceSettings,

    /// Keybinding configuration
    #[serde(default)]
    pub keybindings: KeyBindings,
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Thresholds shared by the shape tools.
///
/// Fields ending in `_px` are rendered pixels and are converted with the
/// current draw rectangle; the rest are normalized image units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub min_resize_px: f32,
    pub box_min_size: f32,
    pub ellipse_min_size: f32,
    pub polygon_close_threshold: f32,
    pub freehand_continue_threshold: f32,
    pub freehand_close_threshold: f32,
    pub handle_hit_radius_px: f32,
    pub stroke_hit_tolerance_px: f32,
    pub drag_start_px: f32,
    /// Undo depth per tool; unbounded when unset.
    pub max_history: Option<usize>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            min_resize_px: constants::MIN_RESIZE_PX,
            box_min_size: constants::BOX_MIN_SIZE,
            ellipse_min_size: constants::ELLIPSE_MIN_SIZE,
            polygon_close_threshold: constants::POLYGON_CLOSE_THRESHOLD,
            freehand_continue_threshold: constants::FREEHAND_CONTINUE_THRESHOLD,
            freehand_close_threshold: constants::FREEHAND_CLOSE_THRESHOLD,
            handle_hit_radius_px: constants::HANDLE_HIT_RADIUS_PX,
            stroke_hit_tolerance_px: constants::STROKE_HIT_TOLERANCE_PX,
            drag_start_px: constants::DRAG_START_PX,
            max_history: None,
        }
    }
}

/// Magic-wand section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WandSettings {
    pub working_size: u32,
    pub blur_sigma: f32,
    pub sensitivity: u32,
    pub simplify_epsilon: f32,
    pub max_vertices: usize,
    pub min_mask_pixels: usize,
}

impl Default for WandSettings {
    fn default() -> Self {
        let extractor = ExtractorSettings::default();
        Self {
            working_size: extractor.working_size,
            blur_sigma: extractor.blur_sigma,
            sensitivity: constants::DEFAULT_WAND_SENSITIVITY,
            simplify_epsilon: extractor.simplify_epsilon,
            max_vertices: extractor.max_vertices,
            min_mask_pixels: extractor.min_mask_pixels,
        }
    }
}

impl WandSettings {
    pub fn extractor_settings(&self) -> ExtractorSettings {
        ExtractorSettings {
            working_size: self.working_size,
            blur_sigma: self.blur_sigma,
            simplify_epsilon: self.simplify_epsilon,
            max_vertices: self.max_vertices,
            min_mask_pixels: self.min_mask_pixels,
        }
    }
}

/// Persistence section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceSettings {
    /// Seconds a fetched payload is served from the cache
    pub cache_ttl_secs: u64,
    /// Upper bound on images warmed by one `AnnotationSession::prefetch` call
    pub prefetch_window: usize,
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        Self {
            cache_ttl_secs: constants::CACHE_TTL_SECS,
            prefetch_window: constants::PREFETCH_WINDOW,
        }
    }
}

impl EditorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: UserPreferences::default(),
            tools: ToolSettings::default(),
            magic_wand: WandSettings::default(),
            persistence: PersistenceSettings::default(),
            keybindings: KeyBindings::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "microlabel-config.json"
    }

    /// Get the default config file path for auto-load/save.
    /// Returns None on WASM (no filesystem access).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("microlabel").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("microlabel")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from a specific file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Save configuration to a specific file, creating parent directories.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {:?}", path);
                Some(config)
            }
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save_to_path(&path)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
