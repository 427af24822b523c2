//! Grid tiling of equirectangular panoramas.

use super::panorama::StreetViewPanorama;
use super::url::UrlScheme;
use crate::compose::{decode_tile, new_canvas, paste};
use crate::error::PanoramaError;
use crate::tile::{Size, Tile, TileAddress};
use image::RgbImage;
use rayon::prelude::*;

/// Clamps `zoom` to the levels the panorama offers.
///
/// # Errors
///
/// Returns `InvalidState` if `image_sizes` is missing or empty; the grid
/// cannot be laid out without it.
pub fn validate_zoom(pano: &StreetViewPanorama, zoom: u8) -> Result<u8, PanoramaError> {
    let levels = match pano.image_sizes.as_deref() {
        Some(sizes) if !sizes.is_empty() => sizes.len(),
        _ => {
            return Err(PanoramaError::InvalidState(format!(
                "panorama {} has no image sizes",
                pano.id
            )))
        }
    };
    let max = u8::try_from(levels - 1).unwrap_or(u8::MAX);
    Ok(zoom.min(max))
}

/// Full image size of `pano` at an already validated `zoom`.
pub fn image_size(pano: &StreetViewPanorama, zoom: u8) -> Result<Size, PanoramaError> {
    let sizes = pano.image_sizes.as_deref().unwrap_or_default();
    sizes
        .get(usize::from(zoom))
        .copied()
        .ok_or_else(|| PanoramaError::InvalidZoom {
            zoom,
            max: u8::try_from(sizes.len().saturating_sub(1)).unwrap_or(u8::MAX),
        })
}

/// Generates the grid tiles covering `pano` at `zoom`.
///
/// The grid is `ceil(width / tile_width)` columns by
/// `ceil(height / tile_height)` rows. Tiles are listed column by column:
/// every row of column 0 first, then column 1, and so on.
///
/// # Errors
///
/// `InvalidZoom` if `zoom` has no image size (validate it first),
/// `InvalidState` for a zero tile dimension.
pub fn generate_tile_list(
    pano: &StreetViewPanorama,
    zoom: u8,
) -> Result<Vec<Tile>, PanoramaError> {
    let size = image_size(pano, zoom)?;
    let tile = pano.tile_size;
    if tile.width == 0 || tile.height == 0 {
        return Err(PanoramaError::InvalidState(format!(
            "panorama {} has an empty tile size",
            pano.id
        )));
    }

    let cols = size.width.div_ceil(tile.width);
    let rows = size.height.div_ceil(tile.height);
    let scheme = UrlScheme::for_panoid(&pano.id);

    let tiles = (0..cols)
        .flat_map(|x| (0..rows).map(move |y| (x, y)))
        .map(|(x, y)| {
            let url = scheme.tile_url(&pano.id, x, y, zoom);
            Tile::new(TileAddress::Grid { x, y }, zoom, url)
        })
        .collect();
    Ok(tiles)
}

/// Pastes fetched grid tiles onto a `width × height` canvas.
///
/// Tile `(x, y)` lands at `(x · tile_width, y · tile_height)`; edge tiles
/// overhanging the canvas are clipped.
pub fn stitch_equirectangular(
    tiles: &[Tile],
    width: u32,
    height: u32,
    tile_size: Size,
) -> Result<RgbImage, PanoramaError> {
    let decoded = tiles
        .par_iter()
        .map(|tile| -> Result<(u32, u32, RgbImage), PanoramaError> {
            let (x, y) = match tile.address() {
                TileAddress::Grid { x, y } => (*x, *y),
                TileAddress::Quad { .. } => {
                    return Err(PanoramaError::InvalidState(format!(
                        "tile {} is not a grid tile",
                        tile.url()
                    )))
                }
            };
            Ok((x, y, decode_tile(tile.require_data()?)?))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut canvas = new_canvas(width, height);
    for (x, y, image) in &decoded {
        paste(
            &mut canvas,
            image,
            x.saturating_mul(tile_size.width),
            y.saturating_mul(tile_size.height),
        );
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::CubemapFace;
    use image::{ImageFormat, Rgb};
    use std::io::Cursor;

    const ID: &str = "8OU3Cz6rJbhGAxSvkeA1Ow";

    fn pano(tile: u32, sizes: &[(u32, u32)]) -> StreetViewPanorama {
        StreetViewPanorama::new(
            ID,
            Size::new(tile, tile),
            Some(sizes.iter().map(|&(w, h)| Size::new(w, h)).collect()),
        )
    }

    fn png(side: u32, color: [u8; 3]) -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbImage::from_pixel(side, side, Rgb(color))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_validate_zoom_clamps() {
        let p = pano(512, &[(512, 256), (1024, 512), (2048, 1024)]);
        assert_eq!(validate_zoom(&p, 5).unwrap(), 2);
        assert_eq!(validate_zoom(&p, 1).unwrap(), 1);
        assert_eq!(validate_zoom(&p, 0).unwrap(), 0);
    }

    #[test]
    fn test_validate_zoom_without_sizes() {
        let mut p = pano(512, &[]);
        assert!(matches!(
            validate_zoom(&p, 0),
            Err(PanoramaError::InvalidState(_))
        ));
        p.image_sizes = None;
        assert!(matches!(
            validate_zoom(&p, 3),
            Err(PanoramaError::InvalidState(_))
        ));
    }

    #[test]
    fn test_two_tile_grid() {
        let p = pano(256, &[(512, 256)]);
        let tiles = generate_tile_list(&p, 0).unwrap();

        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].address(), &TileAddress::Grid { x: 0, y: 0 });
        assert_eq!(tiles[1].address(), &TileAddress::Grid { x: 1, y: 0 });
        assert_eq!(
            tiles[0].url().replace("x=0", "x=1"),
            tiles[1].url(),
            "URLs should differ only in x"
        );
    }

    #[test]
    fn test_partial_tiles_rounded_up() {
        let p = pano(512, &[(1000, 600)]);
        let tiles = generate_tile_list(&p, 0).unwrap();
        // 2 columns × 2 rows, column-major
        let coords: Vec<_> = tiles.iter().map(|t| t.address().clone()).collect();
        assert_eq!(
            coords,
            vec![
                TileAddress::Grid { x: 0, y: 0 },
                TileAddress::Grid { x: 0, y: 1 },
                TileAddress::Grid { x: 1, y: 0 },
                TileAddress::Grid { x: 1, y: 1 },
            ]
        );
    }

    #[test]
    fn test_third_party_template() {
        let mut p = pano(256, &[(256, 256)]);
        p.id = "AF1QipNdSbuLbALgASzFMPv2QD6NuyzWRCaBHPFnG0b8".to_string();
        let tiles = generate_tile_list(&p, 0).unwrap();
        assert_eq!(
            tiles[0].url(),
            "https://lh3.ggpht.com/p/AF1QipNdSbuLbALgASzFMPv2QD6NuyzWRCaBHPFnG0b8=x0-y0-z0"
        );
    }

    #[test]
    fn test_unvalidated_zoom_rejected() {
        let p = pano(256, &[(256, 256)]);
        assert!(matches!(
            generate_tile_list(&p, 3),
            Err(PanoramaError::InvalidZoom { zoom: 3, max: 0 })
        ));
    }

    #[test]
    fn test_zero_tile_size_rejected() {
        let p = pano(0, &[(256, 256)]);
        assert!(matches!(
            generate_tile_list(&p, 0),
            Err(PanoramaError::InvalidState(_))
        ));
    }

    #[test]
    fn test_stitch_clips_edge_tiles() {
        let p = pano(4, &[(6, 3)]);
        let mut tiles = generate_tile_list(&p, 0).unwrap();
        assert_eq!(tiles.len(), 2);
        tiles[0].attach(png(4, [255, 0, 0])).unwrap();
        tiles[1].attach(png(4, [0, 0, 255])).unwrap();

        let image = stitch_equirectangular(&tiles, 6, 3, p.tile_size).unwrap();
        assert_eq!(image.dimensions(), (6, 3));
        assert_eq!(*image.get_pixel(3, 2), Rgb([255, 0, 0]));
        assert_eq!(*image.get_pixel(4, 0), Rgb([0, 0, 255]));
        assert_eq!(*image.get_pixel(5, 2), Rgb([0, 0, 255]));
    }

    #[test]
    fn test_stitch_rejects_quad_tiles() {
        let mut tile = Tile::new(
            TileAddress::Quad {
                face: CubemapFace::Front,
                subdiv: String::new(),
            },
            0,
            "http://t",
        );
        tile.attach(png(2, [0, 0, 0])).unwrap();
        assert!(matches!(
            stitch_equirectangular(&[tile], 2, 2, Size::new(2, 2)),
            Err(PanoramaError::InvalidState(_))
        ));
    }

    #[test]
    fn test_stitch_missing_data() {
        let p = pano(4, &[(4, 4)]);
        let tiles = generate_tile_list(&p, 0).unwrap();
        assert!(matches!(
            stitch_equirectangular(&tiles, 4, 4, p.tile_size),
            Err(PanoramaError::MissingTileData { .. })
        ));
    }
}
