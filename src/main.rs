#[macro_use]
extern crate log;

use clap::Parser;
use log::LevelFilter;
use map_tile_animation::config;
use map_tile_animation::{
    AnimatedTileOverlay, AnimatedTileOverlayDelegate, AnimatingState, OverlayConfig,
    TileFetchError,
};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

/// Headless driver: fetches an animated overlay around a point and plays it.
#[derive(Parser, Debug)]
#[command(name = "map-tile-animation", version)]
struct Args {
    /// Overlay description (JSON)
    #[arg(long)]
    config: PathBuf,

    #[arg(long, default_value_t = config::DEFAULT_MAP_CENTER.0, allow_hyphen_values = true)]
    lat: f32,

    #[arg(long, default_value_t = config::DEFAULT_MAP_CENTER.1, allow_hyphen_values = true)]
    lon: f32,

    #[arg(long, default_value_t = config::DEFAULT_ZOOM)]
    zoom: u32,

    #[arg(long, default_value_t = config::DEFAULT_VIEWPORT.0)]
    width: u32,

    #[arg(long, default_value_t = config::DEFAULT_VIEWPORT.1)]
    height: u32,

    #[arg(long, default_value_t = 30)]
    load_timeout_secs: u64,

    /// How long to play a looping overlay
    #[arg(long, default_value_t = 10)]
    play_secs: u64,
}

/// Logs every notification and keeps an error tally, since the overlay
/// reports each failed tile on its own.
#[derive(Default)]
struct ConsoleDelegate {
    frames_shown: Cell<usize>,
    errors: Cell<usize>,
    finished: Cell<bool>,
}

impl AnimatedTileOverlayDelegate for ConsoleDelegate {
    fn on_animation_state_changed(&self, overlay: &AnimatedTileOverlay, state: AnimatingState) {
        info!("[{:?}] state -> {}", overlay.id(), state);
        if state == AnimatingState::Stopped && self.frames_shown.get() > 0 {
            self.finished.set(true);
        }
    }

    fn on_frame_advanced(&self, overlay: &AnimatedTileOverlay, frame_index: usize) {
        self.frames_shown.set(self.frames_shown.get() + 1);
        debug!(
            "[{:?}] frame {}/{}",
            overlay.id(),
            frame_index + 1,
            overlay.frame_count()
        );
    }

    fn on_fetch_error(&self, overlay: &AnimatedTileOverlay, error: &TileFetchError) {
        self.errors.set(self.errors.get() + 1);
        warn!("[{:?}] {}", overlay.id(), error);
    }
}

fn main() -> Result<(), failure::Error> {
    env_logger::builder()
        .filter_level(LevelFilter::Error)
        .filter_module("map_tile_animation", LevelFilter::Debug)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let overlay_config = OverlayConfig::load(&args.config)?;
    let mut overlay = AnimatedTileOverlay::with_network(overlay_config)?;
    let delegate = Rc::new(ConsoleDelegate::default());
    overlay.set_delegate(&delegate);

    let queued = overlay.fetch_region((args.lat, args.lon), args.zoom, (args.width, args.height));
    info!("Fetching {} tiles for {} frames", queued, overlay.frame_count());
    if !overlay.wait_for_tiles(Duration::from_secs(args.load_timeout_secs)) {
        warn!(
            "Gave up waiting, {} fetches still pending",
            overlay.pending_fetches()
        );
    }

    // Main Event Loop
    let started = Instant::now();
    let play_for = Duration::from_secs(args.play_secs);
    let frame_interval = Duration::from_millis(16);
    overlay.start_animating(started);
    while !delegate.finished.get() && started.elapsed() < play_for {
        overlay.tick(Instant::now());
        thread::sleep(frame_interval);
    }
    overlay.stop();

    info!(
        "Showed {} frames, {} tiles cached, {} fetch errors",
        delegate.frames_shown.get(),
        overlay.loaded_tile_count(),
        delegate.errors.get()
    );
    Ok(())
}
