//! Configuration file handling for ~/.streetlevel/config.ini.
//!
//! Loads and saves user configuration with sensible defaults. A missing
//! file is not an error; every key that is absent falls back to its default.
//!
//! ```ini
//! [download]
//! timeout = 30
//! parallel = 32
//!
//! [streetside]
//! tile_size = 256
//! zoom = 4
//! stitching = row
//!
//! [streetview]
//! zoom = 5
//! ```

use super::{DownloadConfig, EngineConfig};
use crate::compose::CubemapStitchingMethod;
use ini::Ini;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default per-request timeout in seconds.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Default number of parallel downloads for blocking batches.
pub const DEFAULT_PARALLEL_DOWNLOADS: usize = 32;

/// Default tile side in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Largest accepted tile side in pixels.
pub const MAX_TILE_SIZE: u32 = 4096;

/// Default requested Streetside zoom level (the highest that exists).
pub const DEFAULT_STREETSIDE_ZOOM: u8 = 4;

/// Default requested Street View zoom level.
pub const DEFAULT_STREETVIEW_ZOOM: u8 = 5;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

/// `[download]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSettings {
    pub timeout: u64,
    pub parallel: usize,
}

/// `[streetside]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetsideSettings {
    pub tile_size: u32,
    pub zoom: u8,
    pub stitching: CubemapStitchingMethod,
}

/// `[streetview]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetViewSettings {
    pub zoom: u8,
}

/// Parsed contents of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub download: DownloadSettings,
    pub streetside: StreetsideSettings,
    pub streetview: StreetViewSettings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            download: DownloadSettings {
                timeout: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
                parallel: DEFAULT_PARALLEL_DOWNLOADS,
            },
            streetside: StreetsideSettings {
                tile_size: DEFAULT_TILE_SIZE,
                zoom: DEFAULT_STREETSIDE_ZOOM,
                stitching: CubemapStitchingMethod::default(),
            },
            streetview: StreetViewSettings {
                zoom: DEFAULT_STREETVIEW_ZOOM,
            },
        }
    }
}

impl ConfigFile {
    /// Load configuration from the default path (~/.streetlevel/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        Self::from_ini(&ini)
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        self.to_ini()
            .write_to_file(path)
            .map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Download settings as a [`DownloadConfig`].
    pub fn download_config(&self) -> DownloadConfig {
        DownloadConfig::new()
            .with_timeout_secs(self.download.timeout)
            .with_parallel_downloads(self.download.parallel)
    }

    /// Streetside settings as an [`EngineConfig`].
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.streetside.tile_size)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigFileError> {
        let mut config = Self::default();

        if let Some(value) = parse_value(ini, "download", "timeout")? {
            config.download.timeout = value;
        }
        if let Some(value) = parse_value(ini, "download", "parallel")? {
            config.download.parallel = value;
        }
        if let Some(value) = parse_value(ini, "streetside", "tile_size")? {
            config.streetside.tile_size = value;
        }
        if let Some(value) = parse_value(ini, "streetside", "zoom")? {
            config.streetside.zoom = value;
        }
        if let Some(value) = parse_value(ini, "streetside", "stitching")? {
            config.streetside.stitching = value;
        }
        if let Some(value) = parse_value(ini, "streetview", "zoom")? {
            config.streetview.zoom = value;
        }

        let tile_size = config.streetside.tile_size;
        if tile_size == 0 || tile_size > MAX_TILE_SIZE {
            return Err(ConfigFileError::InvalidValue {
                section: "streetside".to_string(),
                key: "tile_size".to_string(),
                value: tile_size.to_string(),
                reason: format!("tile size must be between 1 and {}", MAX_TILE_SIZE),
            });
        }

        Ok(config)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        ini.with_section(Some("download"))
            .set("timeout", self.download.timeout.to_string())
            .set("parallel", self.download.parallel.to_string());
        ini.with_section(Some("streetside"))
            .set("tile_size", self.streetside.tile_size.to_string())
            .set("zoom", self.streetside.zoom.to_string())
            .set("stitching", self.streetside.stitching.to_string());
        ini.with_section(Some("streetview"))
            .set("zoom", self.streetview.zoom.to_string());
        ini
    }
}

/// Reads and parses `section.key`, returning `None` when it is absent.
fn parse_value<T>(ini: &Ini, section: &str, key: &str) -> Result<Option<T>, ConfigFileError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = ini.section(Some(section)).and_then(|s| s.get(key)) else {
        return Ok(None);
    };

    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigFileError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Get the path to the config directory (~/.streetlevel).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".streetlevel")
}

/// Get the path to the config file (~/.streetlevel/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
