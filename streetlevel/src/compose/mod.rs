//! Image decode and composition.
//!
//! Both engines reduce to the same few primitives: decode a tile, create a
//! canvas, paste at a pixel offset. Cubemap output additionally arranges six
//! stitched faces according to a [`CubemapStitchingMethod`].

mod canvas;
mod cubemap;
mod output;

pub use canvas::{decode_tile, new_canvas, paste};
pub use cubemap::{compose_cubemap, CubemapFace, CubemapStitchingMethod};
pub use output::{save_image, SaveOptions, StitchedOutput};
