//! Stitching engine configuration.

use super::file::DEFAULT_TILE_SIZE;

/// Parameters of the stitching engines.
///
/// The cubemap engine assumes square tiles of `tile_size` pixels; every face
/// side and paste offset is derived from it. The default matches the 256px
/// tiles served by Streetside, while tests use tiny synthetic tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    tile_size: u32,
}

impl EngineConfig {
    /// Create an engine configuration with the given tile side in pixels.
    pub fn new(tile_size: u32) -> Self {
        Self { tile_size }
    }

    /// Set the tile side in pixels.
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Tile side in pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tile_size() {
        assert_eq!(EngineConfig::default().tile_size(), 256);
    }

    #[test]
    fn test_with_tile_size() {
        assert_eq!(EngineConfig::default().with_tile_size(8).tile_size(), 8);
    }
}
