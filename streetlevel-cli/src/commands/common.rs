//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use serde::de::DeserializeOwned;
use std::path::Path;
use streetlevel::compose::CubemapStitchingMethod;
use streetlevel::config::ConfigFile;

use crate::error::CliError;

/// Cubemap arrangement selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Stitching {
    /// Six separate face images ({stem}_0 .. {stem}_5)
    None,
    /// Unfolded cube, 4×3 faces
    Net,
    /// All faces in one row, 6×1 faces
    Row,
}

impl From<Stitching> for CubemapStitchingMethod {
    fn from(s: Stitching) -> Self {
        match s {
            Stitching::None => CubemapStitchingMethod::None,
            Stitching::Net => CubemapStitchingMethod::Net,
            Stitching::Row => CubemapStitchingMethod::Row,
        }
    }
}

/// CLI value, falling back to `[streetside] stitching`.
pub fn resolve_stitching(cli: Option<Stitching>, config: &ConfigFile) -> CubemapStitchingMethod {
    cli.map(Into::into).unwrap_or(config.streetside.stitching)
}

/// Reads a panorama record from a JSON file.
pub fn load_panorama<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CliError::PanoramaFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| CliError::PanoramaFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
