//! Animated map-tile overlays.
//!
//! An [`AnimatedTileOverlay`] fetches one tile layer per animation frame on a
//! background worker pool, caches the decoded images and steps through the
//! frames on a host-driven clock. Hosts observe it through an
//! [`AnimatedTileOverlayDelegate`].

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

pub mod animation;
pub mod config;

pub use animation::animated_tile_overlay::{AnimatedTileOverlay, OverlayId};
pub use animation::animating_state::AnimatingState;
pub use animation::common::overlay_error::{OverlayError, TileFetchError, ERROR_DOMAIN};
pub use animation::io::resource::TileLoader;
pub use animation::overlay_config::OverlayConfig;
pub use animation::overlay_delegate::AnimatedTileOverlayDelegate;
pub use animation::tile_id::TileID;
