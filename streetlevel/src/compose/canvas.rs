//! Canvas primitives.

use image::{ImageError, RgbImage};

/// Decodes encoded tile bytes (JPEG, PNG, ...) into an RGB image.
///
/// The format is sniffed from the data; malformed bytes yield an error.
pub fn decode_tile(data: &[u8]) -> Result<RgbImage, ImageError> {
    Ok(image::load_from_memory(data)?.to_rgb8())
}

/// Creates a black canvas of the given size.
pub fn new_canvas(width: u32, height: u32) -> RgbImage {
    RgbImage::new(width, height)
}

/// Pastes `image` onto `canvas` with its top-left corner at (`x`, `y`).
///
/// Pixels falling outside the canvas are dropped, so edge tiles of a grid
/// whose size is not a multiple of the tile size are clipped.
pub fn paste(canvas: &mut RgbImage, image: &RgbImage, x: u32, y: u32) {
    image::imageops::replace(canvas, image, i64::from(x), i64::from(y));
}
