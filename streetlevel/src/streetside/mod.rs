//! Streetside cubemap engine.
//!
//! Streetside panoramas are cubemaps whose faces are subdivided as a
//! quadtree. This module turns a panorama id into per-face tile lists,
//! reassembles each face from its quadrant tree and arranges the faces.
//!
//! ```text
//! pano id ──► generate_tile_list ──► fetch (1 batch/face) ──► stitch_face ×6 ──► compose
//! ```

mod download;
mod panorama;
mod stitch;
mod tiles;

pub use download::{AsyncStreetsideDownloader, StreetsideDownloader};
pub use panorama::StreetsidePanorama;
pub use stitch::{decode_face, stitch_face, stitch_panorama};
pub use tiles::{clamp_zoom, generate_tile_list, tile_url, Face, MAX_ZOOM};
