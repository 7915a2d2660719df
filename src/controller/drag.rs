//! Trim handle drag gestures
//!
//! A gesture holds a [`DragCapture`] from `begin_drag` until `end_drag`.
//! While it is held, pointer moves are routed to the captured handle and the
//! trim range is not persisted. Ending, cancelling, switching videos and
//! shutting down all release it.

use crate::model::{KeyValueStorage, TrackGeometry, TrimHandle};
use crate::player::PlayerSdk;

use super::AppController;

/// Handle and track geometry captured when a drag starts
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragCapture {
    pub handle: TrimHandle,
    pub track: TrackGeometry,
}

impl<S: PlayerSdk, K: KeyValueStorage> AppController<S, K> {
    /// Returns false when the player is not ready to be trimmed.
    pub fn begin_drag(&mut self, handle: TrimHandle, track: TrackGeometry) -> bool {
        if !self.player.state().ready {
            tracing::debug!(?handle, "Ignoring drag before the player is ready");
            return false;
        }
        if self.drag.is_some() {
            self.end_drag();
        }
        self.trim.begin_drag();
        self.drag = Some(DragCapture { handle, track });
        tracing::debug!(?handle, "Trim drag started");
        true
    }

    pub fn drag_to(&mut self, x: f64) {
        let Some(capture) = self.drag else {
            return;
        };
        let Some(percent) = capture.track.percent_at(x) else {
            return;
        };

        match capture.handle {
            TrimHandle::Start => self.trim.set_start(percent),
            TrimHandle::End => self.trim.set_end(percent),
        }

        let state = self.player.state();
        let duration = state.duration;
        if duration <= 0.0 {
            return;
        }
        let range = self.trim.range();
        let current = state.current_time;
        let start_time = range.start_time(duration);
        let end_time = range.end_time(duration);

        let out_of_window = match capture.handle {
            TrimHandle::Start => current < start_time || current >= end_time,
            TrimHandle::End => current >= end_time,
        };
        if out_of_window {
            self.player.seek_to(start_time, true);
        }
    }

    /// Releases the capture and persists the settled range.
    pub fn end_drag(&mut self) {
        if let Some(capture) = self.drag.take() {
            self.trim.end_drag();
            let range = self.trim.range();
            tracing::debug!(handle = ?capture.handle, start = range.start, end = range.end, "Trim drag ended");
        }
    }

    /// Pointer left the surface mid gesture; the edit so far is kept.
    pub fn cancel_drag(&mut self) {
        self.end_drag();
    }
}
