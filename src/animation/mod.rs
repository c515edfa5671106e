pub mod animated_tile_overlay;
pub mod animating_state;
pub mod common;
pub mod frame_cache;
pub mod io;
pub mod overlay_config;
pub mod overlay_delegate;
pub mod tile_id;
pub mod utils;

mod fetch_responder;
