//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Main layout structure (search bar, video list, player panel)
//! - `progress`: Trim track rendering
//! - `overlays`: Error panel and help popup

mod utils;
mod layout;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::controller::AppController;
use crate::model::{KeyValueStorage, TrackGeometry};
use crate::player::PlayerSdk;

pub struct AppView;

impl AppView {
    /// Draws one frame and returns the trim track geometry, if the track was drawn.
    pub fn render<S: PlayerSdk, K: KeyValueStorage>(
        frame: &mut Frame,
        controller: &AppController<S, K>,
    ) -> Option<TrackGeometry> {
        let ui_state = controller.ui_state();
        let playback = controller.playback();
        let phase = controller.phase();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + player status
                Constraint::Min(0),    // Video list + player
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state, &phase);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(35), // Video list
                Constraint::Percentage(65), // Player
            ])
            .split(chunks[1]);

        let videos = controller.visible_videos();
        layout::render_video_list(frame, main_chunks[0], ui_state, &videos, controller.current_video());

        let player_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Video info
                Constraint::Length(4), // Trim track + time labels
            ])
            .split(main_chunks[1]);

        // A player error replaces the whole player, track included
        let track = match &playback.error {
            Some(error) if error.is_fatal_to_view() => {
                overlays::render_error_panel(frame, main_chunks[1], error);
                None
            }
            _ => {
                layout::render_player_info(
                    frame,
                    player_chunks[0],
                    ui_state,
                    controller.current_entry(),
                    playback,
                    &phase,
                );
                progress::render_trim_track(
                    frame,
                    player_chunks[1],
                    playback,
                    controller.trim_range(),
                    controller.settings().track_inset,
                    controller.drag().map(|capture| capture.handle),
                )
            }
        };

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        track
    }
}
