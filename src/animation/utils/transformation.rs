use crate::animation::tile_id::TileID;
use crate::config::TILE_SIZE;
use std::f64::consts;

/// Web Mercator helpers for mapping a viewport onto slippy-map tiles.
pub struct Transformation {}

impl Transformation {
    pub fn latlong_to_tile_coord(lat: f32, long: f32, zoom: u32) -> (f32, f32) {
        let k = 2f32.powi(zoom as i32) / (TILE_SIZE as f32);
        (
            Transformation::long_x(long) * k,
            Transformation::lat_y(lat) * k,
        )
    }

    /// Tiles covering a `viewport` (in pixels) centered on `center_lat_long`.
    pub fn covered_tiles(
        center_lat_long: (f32, f32),
        zoom: u32,
        viewport: (u32, u32),
    ) -> Vec<TileID> {
        let (tile_x, tile_y) =
            Transformation::latlong_to_tile_coord(center_lat_long.0, center_lat_long.1, zoom);

        let delta_tile_x = viewport.0 as f32 / 2.0 / (TILE_SIZE as f32);
        let delta_tile_y = viewport.1 as f32 / 2.0 / (TILE_SIZE as f32);
        let max_index = Transformation::tiles_per_side(zoom) - 1;
        let clamp = |v: f32| -> u32 {
            if v <= 0.0 {
                0
            } else {
                (v.floor() as u64).min(max_index as u64) as u32
            }
        };

        let (min_x, min_y) = (clamp(tile_x - delta_tile_x), clamp(tile_y - delta_tile_y));
        let (max_x, max_y) = (clamp(tile_x + delta_tile_x), clamp(tile_y + delta_tile_y));

        let mut covered_tiles = vec![];
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                covered_tiles.push(TileID { x, y, z: zoom });
            }
        }
        covered_tiles
    }

    pub fn tiles_per_side(zoom: u32) -> u32 {
        1u32.checked_shl(zoom).unwrap_or(u32::MAX)
    }

    fn long_x(lng: f32) -> f32 {
        (180.0 + lng) * (TILE_SIZE as f32) / 360.0
    }

    fn lat_y(lat: f32) -> f32 {
        let y_ = 180.0 / consts::PI
            * (consts::PI / 4.0 + (lat as f64) * consts::PI / 360.0)
                .tan()
                .ln();
        ((180.0 - y_) * (TILE_SIZE as f64) / 360.0) as f32
    }
}
