//! Streetside command - download a cubemap panorama.

use std::path::PathBuf;
use streetlevel::compose::SaveOptions;
use streetlevel::streetside::{
    AsyncStreetsideDownloader, StreetsideDownloader, StreetsidePanorama, MAX_ZOOM,
};

use super::common::{load_panorama, resolve_stitching, Stitching};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the streetside command.
pub struct StreetsideArgs {
    pub id: Option<u64>,
    pub max_zoom: Option<u8>,
    pub pano: Option<PathBuf>,
    pub zoom: Option<u8>,
    pub stitching: Option<Stitching>,
    pub output: PathBuf,
    pub quality: Option<u8>,
    pub async_mode: bool,
}

/// Builds the panorama record from `--pano` or `--id`/`--max-zoom`.
pub fn resolve_panorama(
    id: Option<u64>,
    max_zoom: Option<u8>,
    pano: Option<&PathBuf>,
) -> Result<StreetsidePanorama, CliError> {
    match (id, pano) {
        (_, Some(path)) => load_panorama(path),
        (Some(id), None) => Ok(StreetsidePanorama::new(id, max_zoom.unwrap_or(MAX_ZOOM))),
        (None, None) => Err(CliError::Usage("Either --id or --pano is required".to_string())),
    }
}

/// Run the streetside command.
pub fn run(args: StreetsideArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("streetside");
    let config = runner.config();

    let pano = resolve_panorama(args.id, args.max_zoom, args.pano.as_ref())?;
    let zoom = args.zoom.unwrap_or(config.streetside.zoom);
    let method = resolve_stitching(args.stitching, config);
    let engine = config.engine_config();
    let save_options = SaveOptions {
        jpeg_quality: args.quality,
    };

    println!("Downloading Streetside panorama {}", pano.id);
    println!("  Zoom: {} (panorama maximum {})", zoom.min(pano.max_zoom), pano.max_zoom);
    println!("  Stitching: {}", method);

    let start = std::time::Instant::now();
    let written = if args.async_mode {
        let downloader = AsyncStreetsideDownloader::with_config(runner.async_fetcher()?, engine)
            .with_save_options(save_options);
        runner
            .runtime()?
            .block_on(downloader.download_panorama(&pano, &args.output, zoom, method))?
    } else {
        let downloader = StreetsideDownloader::with_config(runner.blocking_fetcher()?, engine)
            .with_save_options(save_options);
        downloader.download_panorama(&pano, &args.output, zoom, method)?
    };

    println!("Done in {:.2}s", start.elapsed().as_secs_f64());
    for path in written {
        println!("  {}", path.display());
    }
    Ok(())
}
