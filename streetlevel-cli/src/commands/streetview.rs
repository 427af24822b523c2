//! Streetview command - download an equirectangular panorama.

use std::path::PathBuf;
use streetlevel::compose::SaveOptions;
use streetlevel::streetview::{
    validate_zoom, AsyncStreetViewDownloader, StreetViewDownloader, StreetViewPanorama,
};

use super::common::load_panorama;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the streetview command.
pub struct StreetViewArgs {
    pub pano: PathBuf,
    pub zoom: Option<u8>,
    pub output: PathBuf,
    pub quality: Option<u8>,
    pub async_mode: bool,
}

/// Run the streetview command.
pub fn run(args: StreetViewArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("streetview");

    let pano: StreetViewPanorama = load_panorama(&args.pano)?;
    let zoom = args.zoom.unwrap_or(runner.config().streetview.zoom);
    let save_options = SaveOptions {
        jpeg_quality: args.quality,
    };

    println!("Downloading Street View panorama {}", pano.id);
    println!("  Zoom: {}", validate_zoom(&pano, zoom)?);

    let start = std::time::Instant::now();
    let written = if args.async_mode {
        let downloader =
            AsyncStreetViewDownloader::new(runner.async_fetcher()?).with_save_options(save_options);
        runner
            .runtime()?
            .block_on(downloader.download_panorama(&pano, &args.output, zoom))?
    } else {
        let downloader =
            StreetViewDownloader::new(runner.blocking_fetcher()?).with_save_options(save_options);
        downloader.download_panorama(&pano, &args.output, zoom)?
    };

    println!("Done in {:.2}s", start.elapsed().as_secs_f64());
    println!("  {}", written.display());
    Ok(())
}
