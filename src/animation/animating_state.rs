use std::fmt::{Display, Formatter, Result};

/// Lifecycle phase of an [`AnimatedTileOverlay`](super::animated_tile_overlay::AnimatedTileOverlay).
///
/// * `Stopped` - idle; the initial state. Playback is not running.
/// * `Loading` - a fetch batch started from `Stopped` is still in flight.
/// * `Animating` - frames advance on every elapsed frame duration.
/// * `Paused` - playback suspended, the current frame index is kept.
///
/// Fetches started while `Animating` or `Paused` run in the background and do
/// not move the overlay into `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatingState {
    Stopped,
    Loading,
    Animating,
    Paused,
}

impl Default for AnimatingState {
    fn default() -> Self {
        AnimatingState::Stopped
    }
}

impl Display for AnimatingState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let name = match self {
            AnimatingState::Stopped => "stopped",
            AnimatingState::Loading => "loading",
            AnimatingState::Animating => "animating",
            AnimatingState::Paused => "paused",
        };
        write!(f, "{}", name)
    }
}
