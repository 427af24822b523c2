//! Tile data model.
//!
//! A [`Tile`] is one downloadable fragment of a panorama: its address
//! within the panorama, the zoom level it belongs to, the URL it is fetched
//! from and, once fetched, its encoded bytes.

mod types;

pub use types::{attach_batch, Size, Tile, TileAddress};
