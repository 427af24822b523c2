//! End-to-end reconstruction through the public API.
//!
//! Tiles are served from memory: every URL maps to a small PNG whose color
//! encodes where the tile belongs, so the stitched output can be checked
//! pixel by pixel without network access.

use image::{ImageFormat, Rgb, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;
use streetlevel::compose::{CubemapFace, CubemapStitchingMethod};
use streetlevel::config::EngineConfig;
use streetlevel::provider::{AsyncTileFetcher, ProviderError, TileFetcher};
use streetlevel::streetside::{
    generate_tile_list, AsyncStreetsideDownloader, StreetsideDownloader, StreetsidePanorama,
};
use streetlevel::streetview::{StreetViewDownloader, StreetViewPanorama};
use streetlevel::tile::{Size, TileAddress};
use streetlevel::PanoramaError;
use tempfile::TempDir;

const TILE: u32 = 4;

fn png(color: Rgb<u8>) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbImage::from_pixel(TILE, TILE, color)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Serves pre-rendered tiles by URL; unknown URLs are a 404.
struct MemoryFetcher {
    tiles: HashMap<String, Vec<u8>>,
}

impl TileFetcher for MemoryFetcher {
    fn fetch_many(&self, urls: &[String]) -> Result<Vec<Vec<u8>>, ProviderError> {
        urls.iter()
            .map(|url| {
                self.tiles
                    .get(url)
                    .cloned()
                    .ok_or_else(|| ProviderError::HttpError(format!("HTTP 404 for {}", url)))
            })
            .collect()
    }
}

impl AsyncTileFetcher for MemoryFetcher {
    async fn fetch_many(&self, urls: &[String]) -> Result<Vec<Vec<u8>>, ProviderError> {
        TileFetcher::fetch_many(self, urls)
    }
}

/// Red = face index, green = subdivision index.
fn cubemap_color(face: CubemapFace, subdiv: usize) -> Rgb<u8> {
    Rgb([face.index() as u8 * 40, subdiv as u8 * 16, 99])
}

fn streetside_fetcher(pano_id: u64, zoom: u8) -> MemoryFetcher {
    let mut tiles = HashMap::new();
    for face in generate_tile_list(pano_id, zoom).unwrap() {
        for (i, tile) in face.tiles().iter().enumerate() {
            tiles.insert(tile.url().to_string(), png(cubemap_color(face.face(), i)));
        }
    }
    MemoryFetcher { tiles }
}

#[test]
fn streetside_net_layout_places_every_face() {
    let pano = StreetsidePanorama::new(367098685, 2);
    let downloader =
        StreetsideDownloader::with_config(streetside_fetcher(pano.id, 1), EngineConfig::new(TILE));

    let image = downloader
        .get_panorama(&pano, 1, CubemapStitchingMethod::Net)
        .unwrap()
        .into_image()
        .unwrap();

    let side = 2 * TILE;
    assert_eq!(image.dimensions(), (4 * side, 3 * side));

    let cells = [
        (CubemapFace::Left, 0, 1),
        (CubemapFace::Front, 1, 1),
        (CubemapFace::Right, 2, 1),
        (CubemapFace::Back, 3, 1),
        (CubemapFace::Top, 1, 0),
        (CubemapFace::Bottom, 1, 2),
    ];
    for (face, col, row) in cells {
        // Quadrant 3 is the bottom-right quarter of each face
        let x = col * side + TILE + 1;
        let y = row * side + TILE + 1;
        assert_eq!(*image.get_pixel(x, y), cubemap_color(face, 3), "{:?}", face);
    }
}

#[test]
fn streetside_zoom_is_clamped_before_fetching() {
    let pano = StreetsidePanorama::new(42, 1);
    let downloader =
        StreetsideDownloader::with_config(streetside_fetcher(pano.id, 1), EngineConfig::new(TILE));

    let faces = downloader
        .get_panorama(&pano, 4, CubemapStitchingMethod::None)
        .unwrap()
        .into_faces()
        .unwrap();
    assert!(faces.iter().all(|f| f.dimensions() == (2 * TILE, 2 * TILE)));
}

#[test]
fn streetside_missing_tile_aborts() {
    let pano = StreetsidePanorama::new(42, 4);
    let mut fetcher = streetside_fetcher(pano.id, 1);
    let victim = generate_tile_list(pano.id, 1).unwrap()[CubemapFace::Bottom.index()].tiles()[2]
        .url()
        .to_string();
    fetcher.tiles.remove(&victim);

    let downloader = StreetsideDownloader::with_config(fetcher, EngineConfig::new(TILE));
    let result = downloader.get_panorama(&pano, 1, CubemapStitchingMethod::Row);
    assert!(matches!(result, Err(PanoramaError::FetchFailure(_))));
}

#[tokio::test]
async fn streetside_async_writes_faces() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cube.png");
    let pano = StreetsidePanorama::new(7, 4);
    let downloader = AsyncStreetsideDownloader::with_config(
        streetside_fetcher(pano.id, 0),
        EngineConfig::new(TILE),
    );

    let written = downloader
        .download_panorama(&pano, &path, 0, CubemapStitchingMethod::None)
        .await
        .unwrap();

    assert_eq!(written.len(), 6);
    let top = image::open(dir.path().join("cube_4.png")).unwrap().to_rgb8();
    assert_eq!(*top.get_pixel(0, 0), cubemap_color(CubemapFace::Top, 0));
}

#[test]
fn streetview_grid_is_reassembled_and_clipped() {
    let pano = StreetViewPanorama::new(
        "8OU3Cz6rJbhGAxSvkeA1Ow",
        Size::new(TILE, TILE),
        Some(vec![Size::new(4, 2), Size::new(10, 6)]),
    );
    let downloader = StreetViewDownloader::new(MemoryFetcher {
        tiles: HashMap::new(),
    });

    let tiles = downloader.tile_list(&pano, 5).unwrap();
    assert_eq!(tiles.len(), 6);

    let served = tiles
        .iter()
        .map(|t| match t.address() {
            TileAddress::Grid { x, y } => {
                (t.url().to_string(), png(Rgb([*x as u8 * 50, *y as u8 * 50, 0])))
            }
            other => panic!("unexpected address {:?}", other),
        })
        .collect();
    let downloader = StreetViewDownloader::new(MemoryFetcher { tiles: served });

    let image = downloader.get_panorama(&pano, 5).unwrap();
    assert_eq!(image.dimensions(), (10, 6));
    assert_eq!(*image.get_pixel(0, 0), Rgb([0, 0, 0]));
    assert_eq!(*image.get_pixel(9, 5), Rgb([100, 50, 0]));
    assert_eq!(*image.get_pixel(5, 1), Rgb([50, 0, 0]));
}

#[test]
fn streetview_without_sizes_is_invalid() {
    let pano = StreetViewPanorama::new("8OU3Cz6rJbhGAxSvkeA1Ow", Size::new(TILE, TILE), None);
    let downloader = StreetViewDownloader::new(MemoryFetcher {
        tiles: HashMap::new(),
    });
    assert!(matches!(
        downloader.get_panorama(&pano, 0),
        Err(PanoramaError::InvalidState(_))
    ));
}
