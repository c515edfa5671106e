use super::animating_state::AnimatingState;
use super::common::overlay_error::{OverlayError, TileFetchError};
use super::common::task::TileRequest;
use super::common::task_responder::TaskResponder;
use super::common::types::{threadable_new, Threadable};
use super::fetch_responder::{FetchEvent, FetchResponder};
use super::frame_cache::FrameCache;
use super::io::network::Network;
use super::io::resource::{Resource, TileLoader};
use super::overlay_config::OverlayConfig;
use super::overlay_delegate::AnimatedTileOverlayDelegate;
use super::tile_id::TileID;
use super::utils::transformation::Transformation;

use image::DynamicImage;
use std::collections::HashSet;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

static NEXT_OVERLAY_ID: AtomicUsize = AtomicUsize::new(1);

/// Process-unique identity of an overlay, for delegates shared between
/// several overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(usize);

/// A tile overlay whose tiles change over time.
///
/// Every frame is a separate tile layer addressed by its own URL template.
/// Fetching and decoding happen on a worker pool; results are collected on
/// the owning thread by [`tick`](Self::tick), [`process_fetch_events`](Self::process_fetch_events)
/// or [`wait_for_tiles`](Self::wait_for_tiles), and every delegate
/// notification is made from those calls.
pub struct AnimatedTileOverlay {
    id: OverlayId,
    config: OverlayConfig,
    state: AnimatingState,
    current_frame_index: usize,
    last_frame_at: Option<Instant>,
    frames: FrameCache,
    in_flight: HashSet<(usize, TileID)>,
    resource: Resource,
    responder: Threadable<dyn TaskResponder>,
    events: Receiver<FetchEvent>,
    delegate: Option<Weak<dyn AnimatedTileOverlayDelegate>>,
}

impl AnimatedTileOverlay {
    pub fn new(
        config: OverlayConfig,
        loader: Arc<dyn TileLoader>,
    ) -> Result<AnimatedTileOverlay, OverlayError> {
        config.validate()?;

        let (sender, events) = channel();
        let responder: Threadable<dyn TaskResponder> = threadable_new(FetchResponder::new(sender));
        let resource = Resource::new(config.fetch_workers, loader);

        Ok(AnimatedTileOverlay {
            id: OverlayId(NEXT_OVERLAY_ID.fetch_add(1, Ordering::Relaxed)),
            config,
            state: AnimatingState::Stopped,
            current_frame_index: 0,
            last_frame_at: None,
            frames: FrameCache::new(),
            in_flight: HashSet::new(),
            resource,
            responder,
            events,
            delegate: None,
        })
    }

    /// Overlay backed by the HTTP tile loader, sending the config's headers.
    pub fn with_network(config: OverlayConfig) -> Result<AnimatedTileOverlay, OverlayError> {
        let network = Network::new(&config.headers)?;
        AnimatedTileOverlay::new(config, Arc::new(network))
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn state(&self) -> AnimatingState {
        self.state
    }

    pub fn frame_count(&self) -> usize {
        self.config.template_urls.len()
    }

    pub fn current_frame_index(&self) -> usize {
        self.current_frame_index
    }

    pub fn frame_duration(&self) -> Duration {
        self.config.frame_duration()
    }

    pub fn pending_fetches(&self) -> usize {
        self.in_flight.len()
    }

    pub fn loaded_tile_count(&self) -> usize {
        self.frames.loaded_count()
    }

    // Delegate

    /// Replaces the delegate. Only a weak reference is kept.
    pub fn set_delegate<D: AnimatedTileOverlayDelegate + 'static>(&mut self, delegate: &Rc<D>) {
        let delegate: Rc<dyn AnimatedTileOverlayDelegate> = delegate.clone();
        self.delegate = Some(Rc::downgrade(&delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    fn notify<F: FnOnce(&dyn AnimatedTileOverlayDelegate)>(&self, notification: F) {
        match self.delegate.as_ref().and_then(Weak::upgrade) {
            Some(delegate) => notification(delegate.as_ref()),
            None => trace!("Overlay {:?} has no live delegate", self.id),
        }
    }

    // Fetching

    /// Queues every frame of `tiles` that is neither cached nor in flight.
    /// Returns the number of requests queued.
    pub fn fetch_tiles(&mut self, tiles: &[TileID]) -> usize {
        let mut queued = 0;
        for tile in tiles {
            if !self.config.supports_zoom(tile.z) {
                debug!("Overlay {:?} skips {:?}: zoom out of range", self.id, tile);
                continue;
            }
            for (frame_index, template) in self.config.template_urls.iter().enumerate() {
                let key = (frame_index, *tile);
                if self.frames.is_tile_loaded(frame_index, tile) || self.in_flight.contains(&key) {
                    continue;
                }
                let request = TileRequest::new(tile.request_url(template), frame_index, *tile);
                self.in_flight.insert(key);
                self.resource.get(request, self.responder.clone());
                queued += 1;
            }
        }

        if queued > 0 {
            debug!(
                "Overlay {:?} queued {} tile fetches ({} on the pool)",
                self.id,
                queued,
                self.resource.in_flight()
            );
            if self.state == AnimatingState::Stopped {
                self.set_state(AnimatingState::Loading);
            }
        }
        queued
    }

    /// Fetches the tiles covering `viewport` (pixels) around `center_lat_long`,
    /// dropping cached tiles of other zoom levels.
    pub fn fetch_region(
        &mut self,
        center_lat_long: (f32, f32),
        zoom: u32,
        viewport: (u32, u32),
    ) -> usize {
        self.frames.retain_zoom(zoom);
        let covered_tiles = Transformation::covered_tiles(center_lat_long, zoom, viewport);
        self.fetch_tiles(&covered_tiles)
    }

    pub fn clear_cache(&mut self) {
        self.frames.clear();
    }

    /// Handles every fetch that has settled so far without blocking.
    pub fn process_fetch_events(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.events.try_recv() {
            self.handle_fetch_event(event);
            processed += 1;
        }
        processed
    }

    /// Blocks until no fetch is in flight or `timeout` passes. Returns whether
    /// every fetch settled.
    pub fn wait_for_tiles(&mut self, timeout: Duration) -> bool {
        // No deadline when the timeout does not fit in an Instant.
        let deadline = Instant::now().checked_add(timeout);
        while !self.in_flight.is_empty() {
            let received = match deadline {
                Some(deadline) => self
                    .events
                    .recv_timeout(deadline.saturating_duration_since(Instant::now())),
                None => self
                    .events
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(event) => self.handle_fetch_event(event),
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => {
                    error!("Overlay {:?} lost its fetch responder", self.id);
                    return false;
                }
            }
        }
        true
    }

    fn handle_fetch_event(&mut self, event: FetchEvent) {
        let request = event.request();
        self.in_flight.remove(&(request.frame_index, request.tile));

        match event {
            FetchEvent::Loaded { request, image } => {
                trace!("Loaded frame {} of {:?}", request.frame_index, request.tile);
                self.frames.insert(request.frame_index, request.tile, image);
            }
            FetchEvent::Failed { request, error } => {
                warn!("Tile fetch failed: {}", error);
                let fetch_error = TileFetchError::new(request, error);
                self.notify(|delegate| delegate.on_fetch_error(self, &fetch_error));
            }
        }

        if self.in_flight.is_empty() {
            info!(
                "Overlay {:?} finished loading, {} tiles cached",
                self.id,
                self.frames.loaded_count()
            );
            if self.state == AnimatingState::Loading {
                self.set_state(AnimatingState::Stopped);
            }
        }
    }

    // Playback

    /// Starts playback from the current frame. Starting from `Stopped` or
    /// `Loading` reports the starting frame; resuming from `Paused` does not,
    /// since that frame is already on screen.
    pub fn start_animating(&mut self, now: Instant) {
        let resuming = match self.state {
            AnimatingState::Animating => return,
            AnimatingState::Paused => true,
            AnimatingState::Stopped | AnimatingState::Loading => false,
        };
        self.set_state(AnimatingState::Animating);
        self.last_frame_at = Some(now);
        if !resuming {
            self.show_frame(self.current_frame_index);
        }
    }

    pub fn pause(&mut self) {
        if self.state == AnimatingState::Animating {
            self.last_frame_at = None;
            self.set_state(AnimatingState::Paused);
        }
    }

    pub fn stop(&mut self) {
        match self.state {
            AnimatingState::Animating | AnimatingState::Paused => self.finish_playback(),
            AnimatingState::Stopped | AnimatingState::Loading => {}
        }
    }

    /// Drives the overlay from the host's frame loop. Advances at most one
    /// frame per call.
    pub fn tick(&mut self, now: Instant) {
        self.process_fetch_events();

        if self.state != AnimatingState::Animating {
            return;
        }
        let last_frame_at = match self.last_frame_at {
            Some(at) => at,
            None => {
                self.last_frame_at = Some(now);
                return;
            }
        };
        if now.saturating_duration_since(last_frame_at) < self.frame_duration() {
            return;
        }

        self.last_frame_at = Some(now);
        let next = self.current_frame_index + 1;
        if next < self.frame_count() {
            self.show_frame(next);
        } else if self.config.repeats {
            self.show_frame(0);
        } else {
            self.finish_playback();
        }
    }

    /// Jumps to `frame_index`, e.g. from a timeline scrubber. Refused while
    /// animating. A scrub ends the current playback pass, so resuming a
    /// paused overlay afterwards continues from `frame_index` even if it is
    /// below the frame shown before the pause.
    pub fn update_to_frame(&mut self, frame_index: usize) -> Result<(), OverlayError> {
        if self.state == AnimatingState::Animating {
            return Err(OverlayError::Animating);
        }
        if frame_index >= self.frame_count() {
            return Err(OverlayError::FrameOutOfRange {
                index: frame_index,
                count: self.frame_count(),
            });
        }
        self.show_frame(frame_index);
        Ok(())
    }

    fn show_frame(&mut self, frame_index: usize) {
        self.current_frame_index = frame_index;
        self.notify(|delegate| delegate.on_frame_advanced(self, frame_index));
    }

    fn finish_playback(&mut self) {
        self.current_frame_index = 0;
        self.last_frame_at = None;
        self.set_state(AnimatingState::Stopped);
    }

    fn set_state(&mut self, state: AnimatingState) {
        if self.state == state {
            return;
        }
        debug!("Overlay {:?}: {} -> {}", self.id, self.state, state);
        self.state = state;
        self.notify(|delegate| delegate.on_animation_state_changed(self, state));
    }

    // Rendering

    pub fn frame_image(&self, frame_index: usize, tile: &TileID) -> Option<Arc<DynamicImage>> {
        self.frames.get(frame_index, tile)
    }

    pub fn current_frame_image(&self, tile: &TileID) -> Option<Arc<DynamicImage>> {
        self.frames.get(self.current_frame_index, tile)
    }
}
