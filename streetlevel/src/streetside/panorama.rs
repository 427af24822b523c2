//! Streetside panorama record.

use serde::{Deserialize, Serialize};

/// Addressing context of a Streetside panorama.
///
/// Produced by the metadata layer; the tile engine only reads `id` and
/// `max_zoom`. The remaining fields are carried for callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetsidePanorama {
    /// Numeric panorama id (fits in 16 base-4 digits)
    pub id: u64,
    /// Highest zoom level available for this panorama.
    ///
    /// Older Microsoft captures go up to 4, TomTom captures stop at 3.
    pub max_zoom: u8,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Heading in radians
    #[serde(default)]
    pub heading: Option<f64>,
}

impl StreetsidePanorama {
    /// Creates a panorama record with only the addressing fields set.
    pub fn new(id: u64, max_zoom: u8) -> Self {
        Self {
            id,
            max_zoom,
            lat: None,
            lon: None,
            heading: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_json() {
        let pano: StreetsidePanorama =
            serde_json::from_str(r#"{"id": 367098685, "max_zoom": 3}"#).unwrap();
        assert_eq!(pano, StreetsidePanorama::new(367098685, 3));
    }

    #[test]
    fn test_deserialize_with_location() {
        let pano: StreetsidePanorama = serde_json::from_str(
            r#"{"id": 1, "max_zoom": 4, "lat": 47.6, "lon": -122.3, "heading": 1.5}"#,
        )
        .unwrap();
        assert_eq!(pano.lat, Some(47.6));
        assert_eq!(pano.heading, Some(1.5));
    }
}
