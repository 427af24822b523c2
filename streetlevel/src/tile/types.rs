//! Tile types.

use crate::compose::CubemapFace;
use crate::error::PanoramaError;
use crate::provider::ProviderError;
use serde::{Deserialize, Serialize};

/// Position of a tile within its panorama.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TileAddress {
    /// Column/row in an equirectangular grid.
    Grid { x: u32, y: u32 },
    /// Cube face plus base-4 quadtree subdivision code.
    ///
    /// `subdiv` is empty at zoom 0, where a face is a single tile.
    Quad { face: CubemapFace, subdiv: String },
}

/// Width/height pair in pixels.
///
/// Used both for tile dimensions and for the per-zoom image sizes of a
/// Street View panorama.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One downloadable image fragment.
///
/// Tiles are created during tile list generation, receive their bytes
/// exactly once after the fetch and are consumed by stitching.
///
/// # Example
///
/// ```
/// use streetlevel::tile::{Tile, TileAddress};
///
/// let mut tile = Tile::new(TileAddress::Grid { x: 1, y: 0 }, 3, "https://example.com/t");
/// assert!(tile.data().is_none());
/// tile.attach(vec![0xFF, 0xD8]).unwrap();
/// assert_eq!(tile.data(), Some(&[0xFFu8, 0xD8][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    address: TileAddress,
    zoom: u8,
    url: String,
    data: Option<Vec<u8>>,
}

impl Tile {
    /// Create a tile that has not been fetched yet.
    pub fn new(address: TileAddress, zoom: u8, url: impl Into<String>) -> Self {
        Self {
            address,
            zoom,
            url: url.into(),
            data: None,
        }
    }

    /// Address of the tile within its panorama.
    pub fn address(&self) -> &TileAddress {
        &self.address
    }

    /// Zoom level the tile belongs to.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// URL the tile is fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetched bytes, if any.
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Attaches fetched bytes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if the tile already carries data.
    pub fn attach(&mut self, data: Vec<u8>) -> Result<(), PanoramaError> {
        if self.data.is_some() {
            return Err(PanoramaError::InvalidState(format!(
                "tile {} already has data attached",
                self.url
            )));
        }
        self.data = Some(data);
        Ok(())
    }

    /// Consumes the tile, returning its bytes if it was fetched.
    pub fn into_data(self) -> Option<Vec<u8>> {
        self.data
    }

    /// Fetched bytes, or `MissingTileData` if the tile was never fetched.
    pub fn require_data(&self) -> Result<&[u8], PanoramaError> {
        self.data().ok_or_else(|| PanoramaError::MissingTileData {
            url: self.url.clone(),
        })
    }
}

/// Attaches a fetched batch to `tiles` by list position.
///
/// # Errors
///
/// Fails with an `IncompleteBatch` fetch failure if the batch length does
/// not match the number of tiles; no tile is modified in that case.
pub fn attach_batch(tiles: &mut [Tile], buffers: Vec<Vec<u8>>) -> Result<(), PanoramaError> {
    if buffers.len() != tiles.len() {
        return Err(ProviderError::IncompleteBatch {
            expected: tiles.len(),
            received: buffers.len(),
        }
        .into());
    }

    for (tile, data) in tiles.iter_mut().zip(buffers) {
        tile.attach(data)?;
    }
    Ok(())
}
