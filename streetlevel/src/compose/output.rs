//! Stitched panorama output.

use image::codecs::jpeg::JpegEncoder;
use image::{ImageError, ImageFormat, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Encoder settings for written images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// JPEG quality, 1 (worst) to 100 (best). `None` keeps the encoder
    /// default. Ignored for other formats.
    pub jpeg_quality: Option<u8>,
}

impl SaveOptions {
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality);
        self
    }
}

/// Writes `image` to `path`, inferring the format from the extension.
pub fn save_image(image: &RgbImage, path: &Path, options: &SaveOptions) -> Result<(), ImageError> {
    match (options.jpeg_quality, ImageFormat::from_path(path)) {
        (Some(quality), Ok(ImageFormat::Jpeg)) => {
            let mut writer = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(&mut writer, quality).encode_image(image)?;
            writer.flush()?;
            Ok(())
        }
        _ => image.save(path),
    }
}

/// Result of a panorama reconstruction.
///
/// Ownership of the pixel data passes to the caller.
#[derive(Debug, Clone)]
pub enum StitchedOutput {
    /// A single image: an equirectangular panorama or a stitched cubemap.
    Image(RgbImage),
    /// Six separate cube faces in [`CubemapFace`](super::CubemapFace) order.
    Faces([RgbImage; 6]),
}

impl StitchedOutput {
    /// Returns the single image, or `None` for separate faces.
    pub fn into_image(self) -> Option<RgbImage> {
        match self {
            StitchedOutput::Image(image) => Some(image),
            StitchedOutput::Faces(_) => None,
        }
    }

    /// Returns the six faces, or `None` for a single image.
    pub fn into_faces(self) -> Option<[RgbImage; 6]> {
        match self {
            StitchedOutput::Image(_) => None,
            StitchedOutput::Faces(faces) => Some(faces),
        }
    }

    /// Writes the output to disk, inferring the format from the extension.
    ///
    /// Separate faces are written next to `path` as `{stem}_{index}.{ext}`.
    /// Returns the paths written.
    pub fn save(&self, path: &Path) -> Result<Vec<PathBuf>, ImageError> {
        self.save_with(path, &SaveOptions::default())
    }

    /// Like [`save`](Self::save), with explicit encoder settings.
    pub fn save_with(
        &self,
        path: &Path,
        options: &SaveOptions,
    ) -> Result<Vec<PathBuf>, ImageError> {
        match self {
            StitchedOutput::Image(image) => {
                save_image(image, path, options)?;
                Ok(vec![path.to_path_buf()])
            }
            StitchedOutput::Faces(faces) => {
                let mut written = Vec::with_capacity(faces.len());
                for (index, face) in faces.iter().enumerate() {
                    let face_path = face_path(path, index);
                    save_image(face, &face_path, options)?;
                    written.push(face_path);
                }
                Ok(written)
            }
        }
    }
}

/// `dir/name.jpg` -> `dir/name_{index}.jpg`
fn face_path(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{}", stem, index),
    };
    path.with_file_name(file_name)
}
