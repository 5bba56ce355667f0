//! Mutable per-playback state.
//!
//! One entry per active playback slot. The host's scheduler creates entries,
//! marks them available, and recycles them once finished; the engine only
//! flips flags and anchors timestamps on the first update.

/// Playback state for one motion instance.
#[derive(Clone, Debug)]
pub struct PlaybackEntry {
    /// Set by the scheduler once a motion is attached.
    pub available: bool,
    /// Flipped by the engine's idempotent first-update setup.
    pub started: bool,
    pub finished: bool,
    pub start_time: f32,
    pub fade_in_start_time: f32,
    /// Absolute clock time playback must end; `None` while open-ended
    /// (looping, or not yet derived from the clip duration).
    pub end_time: Option<f32>,
}

impl PlaybackEntry {
    pub fn new() -> Self {
        Self {
            available: false,
            started: false,
            finished: false,
            start_time: 0.0,
            fade_in_start_time: 0.0,
            end_time: None,
        }
    }
}

impl Default for PlaybackEntry {
    fn default() -> Self {
        Self::new()
    }
}
