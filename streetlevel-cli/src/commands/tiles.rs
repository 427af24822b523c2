//! Tiles command - print tile URLs without downloading.

use std::path::PathBuf;
use streetlevel::config::ConfigFile;
use streetlevel::streetside::{clamp_zoom, generate_tile_list as streetside_tiles};
use streetlevel::streetview::{
    generate_tile_list as streetview_tiles, validate_zoom, StreetViewPanorama,
};

use super::common::load_panorama;
use super::streetside::resolve_panorama;
use crate::error::CliError;

/// Which engine to list tiles for.
pub enum TilesTarget {
    Streetside {
        id: Option<u64>,
        max_zoom: Option<u8>,
        pano: Option<PathBuf>,
        zoom: Option<u8>,
    },
    StreetView {
        pano: PathBuf,
        zoom: Option<u8>,
    },
}

/// Tile URLs, one per line; Streetside faces are introduced by a header.
pub fn tile_lines(target: &TilesTarget, config: &ConfigFile) -> Result<Vec<String>, CliError> {
    let mut lines = Vec::new();
    match target {
        TilesTarget::Streetside {
            id,
            max_zoom,
            pano,
            zoom,
        } => {
            let pano = resolve_panorama(*id, *max_zoom, pano.as_ref())?;
            let zoom = clamp_zoom(&pano, zoom.unwrap_or(config.streetside.zoom));
            for face in streetside_tiles(pano.id, zoom)? {
                lines.push(format!("# {:?} ({})", face.face(), face.code()));
                lines.extend(face.tiles().iter().map(|t| t.url().to_string()));
            }
        }
        TilesTarget::StreetView { pano, zoom } => {
            let pano: StreetViewPanorama = load_panorama(pano)?;
            let zoom = validate_zoom(&pano, zoom.unwrap_or(config.streetview.zoom))?;
            lines.extend(
                streetview_tiles(&pano, zoom)?
                    .iter()
                    .map(|t| t.url().to_string()),
            );
        }
    }
    Ok(lines)
}

/// Run the tiles command.
pub fn run(target: TilesTarget) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    for line in tile_lines(&target, &config)? {
        println!("{}", line);
    }
    Ok(())
}
