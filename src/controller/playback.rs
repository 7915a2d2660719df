//! Playback control methods

use crate::model::{KeyValueStorage, TrackGeometry};
use crate::player::PlayerSdk;

use super::constraint::{evaluate, Correction};
use super::AppController;

impl<S: PlayerSdk, K: KeyValueStorage> AppController<S, K> {
    /// Applies the trim window to running playback. Runs after every event and command.
    pub fn enforce(&mut self) {
        let Some(correction) = evaluate(self.player.state(), &self.trim.range()) else {
            return;
        };
        match correction {
            Correction::SeekTo(time) => {
                tracing::debug!(time, "Playback before trim start, seeking");
                self.player.seek_to(time, true);
            }
            Correction::PauseAndSeek(time) => {
                tracing::debug!(time, "Playback reached trim end, pausing");
                self.player.pause();
                self.player.seek_to(time, true);
            }
        }
    }

    pub fn toggle_play(&mut self) {
        let state = self.player.state();
        let is_playing = state.playing;
        tracing::debug!(is_playing, "Toggling playback");

        if is_playing {
            self.player.pause();
        } else {
            let range = self.trim.range();
            let (time, duration) = (state.current_time, state.duration);
            if duration > 0.0 && !range.contains_time(time, duration) {
                self.player.seek_to(range.start_time(duration), true);
            }
            self.player.play();
        }
        self.enforce();
    }

    /// Moves the playhead by `delta` seconds, clamped to the video.
    pub fn nudge(&mut self, delta: f64) {
        let state = self.player.state();
        if !state.ready || state.duration <= 0.0 {
            return;
        }
        let time = (state.current_time + delta).clamp(0.0, state.duration);
        self.player.seek_to(time, true);
        self.enforce();
    }

    /// Seeks to the clicked position, snapping to the nearer trim bound outside the window.
    pub fn click_track(&mut self, x: f64, track: TrackGeometry) {
        let state = self.player.state();
        if !state.ready || state.duration <= 0.0 {
            return;
        }
        let Some(percent) = track.percent_at(x) else {
            return;
        };
        let duration = state.duration;
        let range = self.trim.range();

        let time = if percent < range.start || percent > range.end {
            if percent <= range.start {
                range.start_time(duration)
            } else {
                range.end_time(duration)
            }
        } else {
            percent / 100.0 * duration
        };
        tracing::debug!(percent, time, "Scrub track clicked");
        self.player.seek_to(time, true);
        self.enforce();
    }

    pub fn reset_trim(&mut self) {
        if self.drag.is_some() {
            return;
        }
        self.trim.reset();
        tracing::info!(video_id = ?self.current, "Trim reset");
    }

    /// Rebuilds the player for the current video, e.g. from the error panel.
    pub fn reload_player(&mut self) {
        self.end_drag();
        self.player.reload();
    }
}
