//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! routes player session events and keeps playback inside the trim window.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key and mouse event handling
//! - `playback`: Transport commands reinterpreted against the trim window
//! - `navigation`: Search, list navigation and video selection
//! - `drag`: Trim handle drag gestures
//! - `player_events`: Player session event routing
//! - `constraint`: The trim window rule applied to running playback
//! - `trim`: Trim range of the active video and its persistence

mod input;
mod playback;
mod navigation;
mod drag;
mod player_events;
mod constraint;
mod trim;

pub use drag::DragCapture;
pub use trim::TrimController;

use crate::model::{Catalog, KeyValueStorage, PlaybackState, TrimRange, UiState, VideoId};
use crate::player::{PlayerAdapter, PlayerSdk, SessionPhase};

/// Input tuning shared by keyboard and mouse handling
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputSettings {
    /// Seconds moved by the arrow keys.
    pub seek_step: f64,
    /// Columns of padding on each side of the scrub track.
    pub track_inset: u16,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            seek_step: 5.0,
            track_inset: 1,
        }
    }
}

pub struct AppController<S: PlayerSdk, K: KeyValueStorage> {
    pub(crate) player: PlayerAdapter<S>,
    pub(crate) trim: TrimController<K>,
    pub(crate) catalog: Catalog,
    pub(crate) ui: UiState,
    pub(crate) drag: Option<DragCapture>,
    pub(crate) current: Option<VideoId>,
    settings: InputSettings,
}

impl<S: PlayerSdk, K: KeyValueStorage> AppController<S, K> {
    pub fn new(
        player: PlayerAdapter<S>,
        trim: TrimController<K>,
        catalog: Catalog,
        settings: InputSettings,
    ) -> Self {
        Self {
            player,
            trim,
            catalog,
            ui: UiState::default(),
            drag: None,
            current: None,
            settings,
        }
    }

    pub fn playback(&self) -> &PlaybackState {
        self.player.state()
    }

    pub fn phase(&self) -> SessionPhase {
        self.player.phase()
    }

    pub fn trim_range(&self) -> TrimRange {
        self.trim.range()
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui
    }

    pub fn settings(&self) -> InputSettings {
        self.settings
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_video(&self) -> Option<&VideoId> {
        self.current.as_ref()
    }

    pub fn drag(&self) -> Option<&DragCapture> {
        self.drag.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.ui.should_quit
    }

    /// Releases any drag capture and tears the player session down.
    pub fn shutdown(&mut self) {
        self.end_drag();
        self.player.destroy();
        tracing::info!("Controller shut down");
    }
}
