//! Street View equirectangular engine.
//!
//! Street View panoramas are served as a plain grid of tiles covering an
//! equirectangular image. The grid size follows from the image size of the
//! requested zoom level and the panorama's tile size.

mod download;
mod panorama;
mod tiles;
mod url;

pub use download::{AsyncStreetViewDownloader, StreetViewDownloader};
pub use panorama::StreetViewPanorama;
pub use tiles::{generate_tile_list, image_size, stitch_equirectangular, validate_zoom};
pub use url::{is_third_party_panoid, UrlScheme};
