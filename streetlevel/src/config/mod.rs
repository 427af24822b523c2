//! Configuration types for the panorama engines.
//!
//! - [`DownloadConfig`] controls how tile batches are fetched.
//! - [`EngineConfig`] carries the tile pixel size the cubemap stitcher works in.
//! - [`ConfigFile`] loads both (plus CLI defaults) from `~/.streetlevel/config.ini`.
//!
//! # Example
//!
//! ```
//! use streetlevel::config::{DownloadConfig, EngineConfig};
//!
//! let download = DownloadConfig::new().with_parallel_downloads(16);
//! let engine = EngineConfig::default();
//! assert_eq!(engine.tile_size(), 256);
//! assert_eq!(download.parallel_downloads(), 16);
//! ```

mod download;
mod engine;
mod file;

pub use download::DownloadConfig;
pub use engine::EngineConfig;
pub use file::{
    config_directory, config_file_path, ConfigFile, ConfigFileError, DownloadSettings,
    StreetViewSettings, StreetsideSettings, DEFAULT_DOWNLOAD_TIMEOUT_SECS,
    DEFAULT_PARALLEL_DOWNLOADS, DEFAULT_STREETSIDE_ZOOM, DEFAULT_STREETVIEW_ZOOM,
    DEFAULT_TILE_SIZE, MAX_TILE_SIZE,
};
