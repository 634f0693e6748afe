//! Tile Map Data Resources
//!
//! Tile maps are pure data: layered grids of tile ids plus the tag of the
//! tileset texture they index into. They flow through the same cache and
//! loader registry as GPU-bound assets but never touch the upload queue.

use serde::Deserialize;

use crate::errors::{ResourceError, Result};

/// One layer of tile ids, row-major, `width * height` entries. Id 0 is the
/// empty tile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TileLayer {
    pub name: String,
    pub tiles: Vec<u32>,
}

/// A parsed tile map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TileMap {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Dispatch tag of the tileset texture this map indexes into.
    pub tileset: String,
    pub layers: Vec<TileLayer>,
}

impl TileMap {
    /// Parses and validates a map from JSON bytes.
    ///
    /// Every layer must hold exactly `width * height` tiles; a truncated
    /// layer is data corruption, not something to render around.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let map: Self = serde_json::from_slice(bytes)?;
        if map.width == 0 || map.height == 0 {
            return Err(ResourceError::InvalidData(format!(
                "map \"{}\" has zero dimensions",
                map.name
            )));
        }
        let expected = (map.width * map.height) as usize;
        for layer in &map.layers {
            if layer.tiles.len() != expected {
                return Err(ResourceError::InvalidData(format!(
                    "map \"{}\" layer \"{}\": expected {} tiles, got {}",
                    map.name,
                    layer.name,
                    expected,
                    layer.tiles.len()
                )));
            }
        }
        Ok(map)
    }

    /// Empty 0x0 map used as a placeholder.
    #[must_use]
    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            width: 0,
            height: 0,
            tileset: String::new(),
            layers: Vec::new(),
        }
    }

    /// Tile id at `(x, y)` in the given layer, or `None` out of bounds.
    #[must_use]
    pub fn tile_at(&self, layer: usize, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let layer = self.layers.get(layer)?;
        layer.tiles.get((y * self.width + x) as usize).copied()
    }

    /// Heap memory held by the tile grids, in bytes.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.layers
            .iter()
            .map(|l| l.tiles.len() * std::mem::size_of::<u32>())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP_JSON: &[u8] = br#"{
        "name": "town",
        "width": 3,
        "height": 2,
        "tileset": "A5",
        "layers": [
            { "name": "ground", "tiles": [1, 1, 1, 2, 2, 2] },
            { "name": "props",  "tiles": [0, 7, 0, 0, 0, 9] }
        ]
    }"#;

    #[test]
    fn from_json_parses_layers() {
        let map = TileMap::from_json(MAP_JSON).unwrap();
        assert_eq!(map.width, 3);
        assert_eq!(map.height, 2);
        assert_eq!(map.tileset, "A5");
        assert_eq!(map.layers.len(), 2);
    }

    #[test]
    fn tile_at_indexes_row_major() {
        let map = TileMap::from_json(MAP_JSON).unwrap();
        assert_eq!(map.tile_at(0, 0, 0), Some(1));
        assert_eq!(map.tile_at(0, 0, 1), Some(2));
        assert_eq!(map.tile_at(1, 1, 0), Some(7));
        assert_eq!(map.tile_at(1, 2, 1), Some(9));
    }

    #[test]
    fn tile_at_out_of_bounds_is_none() {
        let map = TileMap::from_json(MAP_JSON).unwrap();
        assert_eq!(map.tile_at(0, 3, 0), None);
        assert_eq!(map.tile_at(0, 0, 2), None);
        assert_eq!(map.tile_at(5, 0, 0), None);
    }

    #[test]
    fn from_json_rejects_truncated_layer() {
        let err = TileMap::from_json(
            br#"{
                "name": "bad",
                "width": 2,
                "height": 2,
                "tileset": "A1",
                "layers": [{ "name": "ground", "tiles": [1, 2, 3] }]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ResourceError::InvalidData(_)));
    }

    #[test]
    fn from_json_rejects_zero_dimensions() {
        let err = TileMap::from_json(
            br#"{ "name": "bad", "width": 0, "height": 4, "tileset": "A1", "layers": [] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ResourceError::InvalidData(_)));
    }
}
