//! Street View tile URL schemes.

/// Official panorama ids are 22 characters; user uploads are longer.
const FIRST_PARTY_ID_LEN: usize = 22;

/// Whether `id` belongs to a user-uploaded (third-party) panorama.
pub fn is_third_party_panoid(id: &str) -> bool {
    id.len() > FIRST_PARTY_ID_LEN
}

/// Tile server a panorama is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlScheme {
    /// Google-captured imagery.
    FirstParty,
    /// User-contributed imagery.
    ThirdParty,
}

impl UrlScheme {
    /// Picks the scheme from the shape of the panorama id.
    pub fn for_panoid(id: &str) -> Self {
        if is_third_party_panoid(id) {
            UrlScheme::ThirdParty
        } else {
            UrlScheme::FirstParty
        }
    }

    pub fn tile_url(&self, id: &str, x: u32, y: u32, zoom: u8) -> String {
        match self {
            UrlScheme::FirstParty => format!(
                "https://cbk0.google.com/cbk?output=tile&panoid={}&zoom={}&x={}&y={}",
                id, zoom, x, y
            ),
            UrlScheme::ThirdParty => {
                format!("https://lh3.ggpht.com/p/{}=x{}-y{}-z{}", id, x, y, zoom)
            }
        }
    }
}
