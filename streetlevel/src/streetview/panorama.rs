//! Street View panorama record.

use crate::tile::Size;
use serde::{Deserialize, Serialize};

/// Addressing context of a Street View panorama.
///
/// `image_sizes[z]` is the full image size at zoom `z`; the list is filled
/// in by the metadata layer and may be absent for records that came from a
/// coverage query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetViewPanorama {
    pub id: String,
    pub tile_size: Size,
    #[serde(default)]
    pub image_sizes: Option<Vec<Size>>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

impl StreetViewPanorama {
    pub fn new(id: impl Into<String>, tile_size: Size, image_sizes: Option<Vec<Size>>) -> Self {
        Self {
            id: id.into(),
            tile_size,
            image_sizes,
            lat: None,
            lon: None,
        }
    }
}
