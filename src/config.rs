// Tile Configs
pub const TILE_SIZE: u32 = 256;

// Overlay Configs
pub const DEFAULT_FRAME_DURATION_MS: u64 = 500;
pub const DEFAULT_FETCH_WORKERS: usize = 4;
pub const DEFAULT_MIN_ZOOM: u32 = 0;
pub const DEFAULT_MAX_ZOOM: u32 = 18;

// Network Configs
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// Demo Configs
pub const DEFAULT_VIEWPORT: (u32, u32) = (900, 900);
pub const DEFAULT_MAP_CENTER: (f32, f32) = (37.75, -122.39); // San Francisco
pub const DEFAULT_ZOOM: u32 = 6;
