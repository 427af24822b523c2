//! Error types for panorama reconstruction.

use crate::provider::ProviderError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reconstructing a panorama.
///
/// Every failure aborts the whole reconstruction; no partial image is ever
/// returned.
#[derive(Debug, Error)]
pub enum PanoramaError {
    /// Tile list requested for a zoom level the addressing scheme cannot express
    #[error("Zoom level {zoom} not supported (maximum is {max})")]
    InvalidZoom { zoom: u8, max: u8 },

    /// Panorama record lacks the data needed to address its tiles
    #[error("Invalid panorama state: {0}")]
    InvalidState(String),

    /// A tile download failed or the batch came back incomplete
    #[error("Tile fetch failed: {0}")]
    FetchFailure(#[from] ProviderError),

    /// Tile bytes could not be decoded
    #[error("Failed to decode tile: {0}")]
    Decode(#[from] image::ImageError),

    /// Face tile count cannot be split into quadrants
    #[error("Face has {tiles} tiles, which is not a power of four")]
    InvalidFace { tiles: usize },

    /// A tile reached stitching without fetched bytes
    #[error("Tile {url} has no image data")]
    MissingTileData { url: String },

    /// The stitched output could not be written
    #[error("Failed to save panorama to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
