use super::animated_tile_overlay::AnimatedTileOverlay;
use super::animating_state::AnimatingState;
use super::common::overlay_error::TileFetchError;

/// Observer of an [`AnimatedTileOverlay`].
///
/// All three notifications are delivered on the thread that owns the overlay,
/// from inside its playback and `tick` calls, so implementations can use
/// `Cell`/`RefCell` instead of locks. They should return quickly: the caller
/// is usually a render loop.
///
/// The overlay holds its delegate weakly and passes itself to every call, so
/// one delegate may observe several overlays and tell them apart by
/// [`AnimatedTileOverlay::id`].
pub trait AnimatedTileOverlayDelegate {
    /// Called once per actual state transition, never for an unchanged state.
    fn on_animation_state_changed(&self, overlay: &AnimatedTileOverlay, state: AnimatingState);

    /// Called once per displayed frame. Indices never decrease within a
    /// playback pass; a looping overlay wraps back to 0. Resuming from a
    /// pause does not repeat the frame on screen, while a scrub with
    /// `update_to_frame` starts a new pass at the scrubbed index.
    fn on_frame_advanced(&self, overlay: &AnimatedTileOverlay, frame_index: usize);

    // Does not stop the fetching of other tiles, could have multiple errors
    fn on_fetch_error(&self, overlay: &AnimatedTileOverlay, error: &TileFetchError);
}
