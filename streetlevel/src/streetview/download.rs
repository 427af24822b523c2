//! Street View reconstruction drivers.
//!
//! The whole grid is fetched as a single batch, then pasted onto a canvas
//! of the image size for the chosen zoom.

use super::panorama::StreetViewPanorama;
use super::tiles::{generate_tile_list, image_size, stitch_equirectangular, validate_zoom};
use crate::compose::{save_image, SaveOptions};
use crate::error::PanoramaError;
use crate::provider::{AsyncTileFetcher, TileFetcher};
use crate::tile::{attach_batch, Tile};
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument};

fn save_output(
    image: &RgbImage,
    path: &Path,
    options: &SaveOptions,
) -> Result<PathBuf, PanoramaError> {
    save_image(image, path, options).map_err(|source| PanoramaError::Save {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

fn tile_urls(tiles: &[Tile]) -> Vec<String> {
    tiles.iter().map(|t| t.url().to_string()).collect()
}

/// Blocking Street View driver.
pub struct StreetViewDownloader<F: TileFetcher> {
    fetcher: F,
    save_options: SaveOptions,
}

impl<F: TileFetcher> StreetViewDownloader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            save_options: SaveOptions::default(),
        }
    }

    /// Encoder settings used by [`download_panorama`](Self::download_panorama).
    pub fn with_save_options(mut self, options: SaveOptions) -> Self {
        self.save_options = options;
        self
    }

    /// Tile list of `pano` with `zoom` clamped to the available levels.
    pub fn tile_list(
        &self,
        pano: &StreetViewPanorama,
        zoom: u8,
    ) -> Result<Vec<Tile>, PanoramaError> {
        generate_tile_list(pano, validate_zoom(pano, zoom)?)
    }

    /// Downloads and stitches an equirectangular panorama.
    ///
    /// Zoom levels above the highest available one fall back to it.
    #[instrument(skip(self, pano), fields(pano_id = %pano.id))]
    pub fn get_panorama(
        &self,
        pano: &StreetViewPanorama,
        zoom: u8,
    ) -> Result<RgbImage, PanoramaError> {
        let start = Instant::now();
        let zoom = validate_zoom(pano, zoom)?;
        let size = image_size(pano, zoom)?;
        let mut tiles = generate_tile_list(pano, zoom)?;
        info!(
            zoom = zoom,
            width = size.width,
            height = size.height,
            tiles = tiles.len(),
            "Downloading equirectangular panorama"
        );

        let buffers = self.fetcher.fetch_many(&tile_urls(&tiles))?;
        attach_batch(&mut tiles, buffers)?;

        let image = stitch_equirectangular(&tiles, size.width, size.height, pano.tile_size)?;
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Panorama reconstructed"
        );
        Ok(image)
    }

    /// Downloads a panorama and writes it to `path`.
    pub fn download_panorama(
        &self,
        pano: &StreetViewPanorama,
        path: &Path,
        zoom: u8,
    ) -> Result<PathBuf, PanoramaError> {
        let image = self.get_panorama(pano, zoom)?;
        save_output(&image, path, &self.save_options)
    }
}

/// Suspend-capable Street View driver.
pub struct AsyncStreetViewDownloader<F: AsyncTileFetcher> {
    fetcher: F,
    save_options: SaveOptions,
}

impl<F: AsyncTileFetcher> AsyncStreetViewDownloader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            save_options: SaveOptions::default(),
        }
    }

    pub fn with_save_options(mut self, options: SaveOptions) -> Self {
        self.save_options = options;
        self
    }

    pub fn tile_list(
        &self,
        pano: &StreetViewPanorama,
        zoom: u8,
    ) -> Result<Vec<Tile>, PanoramaError> {
        generate_tile_list(pano, validate_zoom(pano, zoom)?)
    }

    #[instrument(skip(self, pano), fields(pano_id = %pano.id))]
    pub async fn get_panorama(
        &self,
        pano: &StreetViewPanorama,
        zoom: u8,
    ) -> Result<RgbImage, PanoramaError> {
        let start = Instant::now();
        let zoom = validate_zoom(pano, zoom)?;
        let size = image_size(pano, zoom)?;
        let mut tiles = generate_tile_list(pano, zoom)?;
        info!(
            zoom = zoom,
            width = size.width,
            height = size.height,
            tiles = tiles.len(),
            "Downloading equirectangular panorama"
        );

        let buffers = self.fetcher.fetch_many(&tile_urls(&tiles)).await?;
        attach_batch(&mut tiles, buffers)?;

        let image = stitch_equirectangular(&tiles, size.width, size.height, pano.tile_size)?;
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Panorama reconstructed"
        );
        Ok(image)
    }

    pub async fn download_panorama(
        &self,
        pano: &StreetViewPanorama,
        path: &Path,
        zoom: u8,
    ) -> Result<PathBuf, PanoramaError> {
        let image = self.get_panorama(pano, zoom).await?;
        save_output(&image, path, &self.save_options)
    }
}
