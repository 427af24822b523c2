//! Quadtree tile addressing for Streetside cubemaps.
//!
//! Every tile key is the concatenation of three base-4 strings:
//!
//! ```text
//! hs 0000000111313321 01 203
//!    └── pano id ───┘ │  └─ subdivision, one digit per zoom level
//!                     └──── face id (1..6)
//! ```

use super::panorama::StreetsidePanorama;
use crate::compose::CubemapFace;
use crate::coord::{to_base4_padded, FACE_ID_DIGITS, MAX_PANO_ID, PANO_ID_DIGITS};
use crate::error::PanoramaError;
use crate::tile::{Tile, TileAddress};

/// Highest zoom level the quadtree addressing supports.
pub const MAX_ZOOM: u8 = 4;

/// Tiles of one cube face, ordered by subdivision index.
///
/// The order is what the recursive stitch reconstructs the quadrant tree
/// from, so it must never be changed after generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    face: CubemapFace,
    code: String,
    tiles: Vec<Tile>,
}

impl Face {
    /// Which cube direction this face is.
    pub fn face(&self) -> CubemapFace {
        self.face
    }

    /// Two-digit base-4 face code used in tile keys.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Tiles in subdivision order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Mutable tiles, for attaching fetched data.
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Tile URLs in subdivision order.
    pub fn urls(&self) -> Vec<String> {
        self.tiles.iter().map(|t| t.url().to_string()).collect()
    }

    /// Number of tiles; always a power of four.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for generated faces.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Builds the URL of one cubemap tile from its base-4 key parts.
pub fn tile_url(pano_id_base4: &str, face_code: &str, subdiv_code: &str) -> String {
    format!(
        "https://t.ssl.ak.tiles.virtualearth.net/tiles/hs{}{}{}.jpg?g=13716",
        pano_id_base4, face_code, subdiv_code
    )
}

/// Clamps a requested zoom level to what the panorama offers.
pub fn clamp_zoom(pano: &StreetsidePanorama, zoom: u8) -> u8 {
    zoom.min(pano.max_zoom)
}

/// Generates the six faces of a panorama and their tiles at `zoom`.
///
/// Each face holds `4^zoom` tiles ordered by increasing subdivision index.
///
/// # Errors
///
/// - `InvalidZoom` if `zoom` exceeds [`MAX_ZOOM`]; clamp first.
/// - `InvalidState` if `pano_id` does not fit in 16 base-4 digits.
///
/// # Example
///
/// ```
/// use streetlevel::streetside::generate_tile_list;
///
/// let faces = generate_tile_list(5, 1).unwrap();
/// assert_eq!(faces.len(), 6);
/// assert_eq!(faces[0].len(), 4);
/// assert_eq!(
///     faces[0].tiles()[3].url(),
///     "https://t.ssl.ak.tiles.virtualearth.net/tiles/hs0000000000000011013.jpg?g=13716"
/// );
/// ```
pub fn generate_tile_list(pano_id: u64, zoom: u8) -> Result<[Face; 6], PanoramaError> {
    if zoom > MAX_ZOOM {
        return Err(PanoramaError::InvalidZoom {
            zoom,
            max: MAX_ZOOM,
        });
    }
    if pano_id > MAX_PANO_ID {
        return Err(PanoramaError::InvalidState(format!(
            "panorama id {} does not fit in {} base-4 digits",
            pano_id, PANO_ID_DIGITS
        )));
    }

    let pano_id_base4 = to_base4_padded(pano_id, PANO_ID_DIGITS);
    let subdivisions = 4u64.pow(u32::from(zoom));

    Ok(CubemapFace::ALL.map(|face| {
        let code = to_base4_padded(u64::from(face.id()), FACE_ID_DIGITS);
        let tiles = (0..subdivisions)
            .map(|subdiv| {
                let subdiv = to_base4_padded(subdiv, usize::from(zoom));
                let url = tile_url(&pano_id_base4, &code, &subdiv);
                Tile::new(TileAddress::Quad { face, subdiv }, zoom, url)
            })
            .collect();
        Face { face, code, tiles }
    }))
}
