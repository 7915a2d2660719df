//! Keeps running playback inside the trim window

use crate::model::{PlaybackState, TrimRange};

/// Corrective transport command issued when playback leaves the window
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Correction {
    /// Playback is before the window.
    SeekTo(f64),
    /// Playback reached the end of the window.
    PauseAndSeek(f64),
}

/// Only running playback (ready, playing, known duration) is corrected.
pub fn evaluate(state: &PlaybackState, range: &TrimRange) -> Option<Correction> {
    if !state.is_running() {
        return None;
    }
    let start_time = range.start_time(state.duration);
    let end_time = range.end_time(state.duration);

    if state.current_time < start_time {
        Some(Correction::SeekTo(start_time))
    } else if state.current_time >= end_time {
        Some(Correction::PauseAndSeek(start_time))
    } else {
        None
    }
}
