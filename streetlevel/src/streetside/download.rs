//! Streetside reconstruction drivers.
//!
//! Both drivers run the same sequence: clamp the zoom, generate the tile
//! list, fetch one batch per face, attach the bytes by position and stitch.
//! Any failure aborts the whole panorama.

use super::panorama::StreetsidePanorama;
use super::stitch::stitch_panorama;
use super::tiles::{clamp_zoom, generate_tile_list, Face};
use crate::compose::{CubemapStitchingMethod, SaveOptions, StitchedOutput};
use crate::config::EngineConfig;
use crate::error::PanoramaError;
use crate::provider::{AsyncTileFetcher, TileFetcher};
use crate::tile::attach_batch;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

fn save_output(
    output: &StitchedOutput,
    path: &Path,
    options: &SaveOptions,
) -> Result<Vec<PathBuf>, PanoramaError> {
    output.save_with(path, options).map_err(|source| PanoramaError::Save {
        path: path.to_path_buf(),
        source,
    })
}

/// Blocking Streetside driver.
///
/// # Example
///
/// ```no_run
/// use streetlevel::compose::CubemapStitchingMethod;
/// use streetlevel::provider::{HttpTileFetcher, ReqwestClient};
/// use streetlevel::streetside::{StreetsideDownloader, StreetsidePanorama};
///
/// let client = ReqwestClient::new().unwrap();
/// let downloader = StreetsideDownloader::new(HttpTileFetcher::new(client).unwrap());
/// let pano = StreetsidePanorama::new(367098685, 4);
/// let output = downloader
///     .get_panorama(&pano, 2, CubemapStitchingMethod::Net)
///     .unwrap();
/// ```
pub struct StreetsideDownloader<F: TileFetcher> {
    fetcher: F,
    config: EngineConfig,
    save_options: SaveOptions,
}

impl<F: TileFetcher> StreetsideDownloader<F> {
    /// Create a driver with the default 256px tiles.
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, EngineConfig::default())
    }

    pub fn with_config(fetcher: F, config: EngineConfig) -> Self {
        Self {
            fetcher,
            config,
            save_options: SaveOptions::default(),
        }
    }

    /// Encoder settings used by [`download_panorama`](Self::download_panorama).
    pub fn with_save_options(mut self, options: SaveOptions) -> Self {
        self.save_options = options;
        self
    }

    /// Tile list of `pano` at `zoom`, clamped to the panorama's maximum.
    pub fn tile_list(
        &self,
        pano: &StreetsidePanorama,
        zoom: u8,
    ) -> Result<[Face; 6], PanoramaError> {
        generate_tile_list(pano.id, clamp_zoom(pano, zoom))
    }

    /// Downloads and stitches a cubemap panorama.
    #[instrument(skip(self, pano), fields(pano_id = pano.id))]
    pub fn get_panorama(
        &self,
        pano: &StreetsidePanorama,
        zoom: u8,
        method: CubemapStitchingMethod,
    ) -> Result<StitchedOutput, PanoramaError> {
        let start = Instant::now();
        let mut faces = self.tile_list(pano, zoom)?;
        let zoom = clamp_zoom(pano, zoom);
        info!(zoom = zoom, tiles_per_face = faces[0].len(), "Downloading cubemap");

        for face in faces.iter_mut() {
            let buffers = self.fetcher.fetch_many(&face.urls())?;
            attach_batch(face.tiles_mut(), buffers)?;
            debug!(face = ?face.face(), "Face fetched");
        }

        let output = stitch_panorama(&faces, &self.config, method)?;
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Cubemap reconstructed"
        );
        Ok(output)
    }

    /// Downloads a panorama and writes it to `path`.
    ///
    /// Returns the paths written; six of them when `method` is `None`.
    pub fn download_panorama(
        &self,
        pano: &StreetsidePanorama,
        path: &Path,
        zoom: u8,
        method: CubemapStitchingMethod,
    ) -> Result<Vec<PathBuf>, PanoramaError> {
        let output = self.get_panorama(pano, zoom, method)?;
        save_output(&output, path, &self.save_options)
    }
}

/// Suspend-capable Streetside driver.
///
/// Faces are still fetched one batch at a time; the fetcher decides how
/// the tiles within a batch are scheduled.
pub struct AsyncStreetsideDownloader<F: AsyncTileFetcher> {
    fetcher: F,
    config: EngineConfig,
    save_options: SaveOptions,
}

impl<F: AsyncTileFetcher> AsyncStreetsideDownloader<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, EngineConfig::default())
    }

    pub fn with_config(fetcher: F, config: EngineConfig) -> Self {
        Self {
            fetcher,
            config,
            save_options: SaveOptions::default(),
        }
    }

    pub fn with_save_options(mut self, options: SaveOptions) -> Self {
        self.save_options = options;
        self
    }

    /// Tile list of `pano` at `zoom`, clamped to the panorama's maximum.
    pub fn tile_list(
        &self,
        pano: &StreetsidePanorama,
        zoom: u8,
    ) -> Result<[Face; 6], PanoramaError> {
        generate_tile_list(pano.id, clamp_zoom(pano, zoom))
    }

    #[instrument(skip(self, pano), fields(pano_id = pano.id))]
    pub async fn get_panorama(
        &self,
        pano: &StreetsidePanorama,
        zoom: u8,
        method: CubemapStitchingMethod,
    ) -> Result<StitchedOutput, PanoramaError> {
        let start = Instant::now();
        let mut faces = self.tile_list(pano, zoom)?;
        info!(
            zoom = clamp_zoom(pano, zoom),
            tiles_per_face = faces[0].len(),
            "Downloading cubemap"
        );

        for face in faces.iter_mut() {
            let buffers = self.fetcher.fetch_many(&face.urls()).await?;
            attach_batch(face.tiles_mut(), buffers)?;
            debug!(face = ?face.face(), "Face fetched");
        }

        let output = stitch_panorama(&faces, &self.config, method)?;
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Cubemap reconstructed"
        );
        Ok(output)
    }

    pub async fn download_panorama(
        &self,
        pano: &StreetsidePanorama,
        path: &Path,
        zoom: u8,
        method: CubemapStitchingMethod,
    ) -> Result<Vec<PathBuf>, PanoramaError> {
        let output = self.get_panorama(pano, zoom, method).await?;
        save_output(&output, path, &self.save_options)
    }
}
