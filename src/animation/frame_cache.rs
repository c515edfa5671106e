use super::tile_id::TileID;

use image::DynamicImage;
use std::collections::HashMap;
use std::sync::Arc;

/// Decoded tile images keyed by animation frame, then tile.
pub struct FrameCache {
    loaded_tiles: HashMap<usize, HashMap<TileID, Arc<DynamicImage>>>,
}

impl FrameCache {
    pub fn new() -> FrameCache {
        FrameCache {
            loaded_tiles: HashMap::new(),
        }
    }

    pub fn insert(&mut self, frame_index: usize, tile: TileID, image: Arc<DynamicImage>) {
        self.loaded_tiles
            .entry(frame_index)
            .or_insert_with(HashMap::new)
            .insert(tile, image);
    }

    pub fn get(&self, frame_index: usize, tile: &TileID) -> Option<Arc<DynamicImage>> {
        self.loaded_tiles
            .get(&frame_index)
            .and_then(|tiles| tiles.get(tile))
            .cloned()
    }

    pub fn is_tile_loaded(&self, frame_index: usize, tile: &TileID) -> bool {
        self.loaded_tiles
            .get(&frame_index)
            .map_or(false, |tiles| tiles.contains_key(tile))
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded_tiles.values().map(HashMap::len).sum()
    }

    /// Drops every tile not at `zoom`.
    pub fn retain_zoom(&mut self, zoom: u32) {
        for tiles in self.loaded_tiles.values_mut() {
            tiles.retain(|tile, _| tile.z == zoom);
        }
        self.loaded_tiles.retain(|_, tiles| !tiles.is_empty());
    }

    pub fn clear(&mut self) {
        self.loaded_tiles.clear();
    }
}

impl Default for FrameCache {
    fn default() -> Self {
        FrameCache::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> Arc<DynamicImage> {
        Arc::new(DynamicImage::new_rgba8(1, 1))
    }

    #[test]
    fn tracks_tiles_per_frame() {
        let mut cache = FrameCache::new();
        let tile = TileID::new(1, 1, 2);
        cache.insert(0, tile, image());

        assert!(cache.is_tile_loaded(0, &tile));
        assert!(!cache.is_tile_loaded(1, &tile));
        assert!(cache.get(0, &tile).is_some());
        assert!(cache.get(1, &tile).is_none());
        assert_eq!(cache.loaded_count(), 1);
    }

    #[test]
    fn retain_zoom_drops_other_levels() {
        let mut cache = FrameCache::new();
        cache.insert(0, TileID::new(0, 0, 1), image());
        cache.insert(1, TileID::new(0, 0, 2), image());
        cache.insert(1, TileID::new(1, 0, 2), image());

        cache.retain_zoom(2);
        assert_eq!(cache.loaded_count(), 2);
        assert!(!cache.is_tile_loaded(0, &TileID::new(0, 0, 1)));

        cache.clear();
        assert_eq!(cache.loaded_count(), 0);
    }
}
