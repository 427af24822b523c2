//! Quadtree face reconstruction.
//!
//! A face at zoom `z` is a `2^z × 2^z` grid of tiles, but the tiles arrive in
//! subdivision order: the first base-4 digit picks a quadrant of the face,
//! the second a quadrant of that quadrant, and so on. Quadrant `q` sits at
//! column `q % 2`, row `q / 2`.

use super::tiles::Face;
use crate::compose::{
    compose_cubemap, decode_tile, new_canvas, paste, CubemapStitchingMethod, StitchedOutput,
};
use crate::config::EngineConfig;
use crate::error::PanoramaError;
use image::RgbImage;
use rayon::prelude::*;
use tracing::debug;

fn is_power_of_four(n: usize) -> bool {
    n.is_power_of_two() && n.trailing_zeros() % 2 == 0
}

/// Side in pixels of a face made of `tiles` tiles, `sqrt(tiles) * tile_size`.
fn face_side(tiles: usize, tile_size: u32) -> Result<u32, PanoramaError> {
    let per_side = 1u32 << (tiles.trailing_zeros() / 2);
    per_side.checked_mul(tile_size).ok_or_else(|| {
        PanoramaError::InvalidState(format!(
            "face of {} tiles at {}px exceeds image bounds",
            tiles, tile_size
        ))
    })
}

/// Reconstructs one square face from tiles in subdivision order.
///
/// A single tile is returned as the face itself. Otherwise the face side is
/// `sqrt(len) * tile_size`.
///
/// # Errors
///
/// Returns `InvalidFace` if the tile count is not a power of four, and
/// `InvalidState` if the face side does not fit in `u32`.
pub fn stitch_face(tiles: &[RgbImage], tile_size: u32) -> Result<RgbImage, PanoramaError> {
    if !is_power_of_four(tiles.len()) {
        return Err(PanoramaError::InvalidFace { tiles: tiles.len() });
    }
    if let [single] = tiles {
        return Ok(single.clone());
    }

    let side = face_side(tiles.len(), tile_size)?;
    let mut canvas = new_canvas(side, side);
    place_quadrants(&mut canvas, tiles, 0, 0, side);
    Ok(canvas)
}

/// Pastes `tiles` into the `side`-sized square at (`x`, `y`).
fn place_quadrants(canvas: &mut RgbImage, tiles: &[RgbImage], x: u32, y: u32, side: u32) {
    if let [tile] = tiles {
        paste(canvas, tile, x, y);
        return;
    }

    let half = side / 2;
    for (q, quarter) in tiles.chunks(tiles.len() / 4).enumerate() {
        let q = q as u32;
        place_quadrants(canvas, quarter, x + (q % 2) * half, y + (q / 2) * half, half);
    }
}

/// Decodes the fetched tiles of a face, preserving subdivision order.
///
/// # Errors
///
/// `MissingTileData` for a tile that was never fetched, `Decode` for bytes
/// that are not an image.
pub fn decode_face(face: &Face) -> Result<Vec<RgbImage>, PanoramaError> {
    face.tiles()
        .par_iter()
        .map(|tile| -> Result<RgbImage, PanoramaError> {
            Ok(decode_tile(tile.require_data()?)?)
        })
        .collect()
}

/// Decodes and stitches all six faces, then arranges them per `method`.
///
/// Faces are laid out on a grid of `sqrt(tiles_per_face) * tile_size` at
/// every zoom, so a zoom 0 tile of another size is clipped or padded.
pub fn stitch_panorama(
    faces: &[Face; 6],
    config: &EngineConfig,
    method: CubemapStitchingMethod,
) -> Result<StitchedOutput, PanoramaError> {
    let tile_size = config.tile_size();
    let tiles_per_face = faces[0].len();

    let images = faces
        .iter()
        .map(|face| stitch_face(&decode_face(face)?, tile_size))
        .collect::<Result<Vec<_>, _>>()?;
    let images: [RgbImage; 6] = images
        .try_into()
        .map_err(|_| PanoramaError::InvalidState("cubemap needs six faces".to_string()))?;

    let side = face_side(tiles_per_face, tile_size)?;

    debug!(
        face_side = side,
        tiles_per_face = tiles_per_face,
        method = %method,
        "Faces stitched"
    );

    compose_cubemap(images, side, method)
}
