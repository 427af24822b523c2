//! Streetlevel - panorama reconstruction from street-level imagery tiles
//!
//! Street-level imagery services serve panoramas as many small image tiles.
//! This library computes which tiles make up a panorama at a given zoom
//! level, fetches them as a batch and stitches them back together.
//!
//! Two engines are provided:
//!
//! - [`streetside`]: Streetside cubemaps whose six faces are quadtree
//!   subdivided and addressed by base-4 keys.
//! - [`streetview`]: Street View equirectangular images cut into a plain
//!   `x`/`y` grid.
//!
//! Each engine has a blocking driver running on a [`provider::TileFetcher`]
//! and an async driver running on a [`provider::AsyncTileFetcher`].

pub mod compose;
pub mod config;
pub mod coord;
pub mod error;
pub mod logging;
pub mod provider;
pub mod streetside;
pub mod streetview;
pub mod tile;

pub use error::PanoramaError;
