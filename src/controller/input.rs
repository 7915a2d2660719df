//! Key and mouse event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::model::{ActiveSection, KeyValueStorage, TrackGeometry, TrimHandle};
use crate::player::PlayerSdk;
use super::AppController;

/// Columns around a handle that still grab it instead of seeking.
const HANDLE_REACH: f64 = 1.0;

impl<S: PlayerSdk, K: KeyValueStorage> AppController<S, K> {
    /// Track geometry from the last rendered frame.
    pub fn set_track(&mut self, track: Option<TrackGeometry>) {
        self.ui.track = track;
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Handle help popup
        if self.ui.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                self.ui.show_help_popup = false;
            }
            return;
        }

        if key.code == KeyCode::Esc && self.drag.is_some() {
            self.cancel_drag();
            return;
        }

        // Handle search input when in search section; playback shortcuts are off here
        if self.ui.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        self.cycle_section_backward();
                    } else {
                        self.cycle_section_forward();
                    }
                }
                KeyCode::BackTab => self.cycle_section_backward(),
                KeyCode::Enter => self.submit_search(),
                KeyCode::Esc => self.clear_search(),
                KeyCode::Backspace => self.backspace_search(),
                KeyCode::Char(c) => {
                    // Q still quits even in search mode when Ctrl is pressed
                    if (c == 'q' || c == 'Q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        self.ui.should_quit = true;
                    } else {
                        self.append_to_search(c);
                    }
                }
                _ => {}
            }
            return;
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.ui.should_quit = true;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.cycle_section_backward();
                } else {
                    self.cycle_section_forward();
                }
            }
            KeyCode::BackTab => self.cycle_section_backward(),
            KeyCode::Up => self.move_selection_up(),
            KeyCode::Down => self.move_selection_down(),
            KeyCode::Enter => {
                if self.ui.active_section == ActiveSection::Videos {
                    self.select_highlighted();
                }
            }
            // Play/Pause toggle
            KeyCode::Char(' ') | KeyCode::Char('k') => self.toggle_play(),
            KeyCode::Left => self.nudge(-self.settings().seek_step),
            KeyCode::Right => self.nudge(self.settings().seek_step),
            // Reset trim to the full video
            KeyCode::Char('r') => self.reset_trim(),
            // Reload the player
            KeyCode::Char('R') => self.reload_player(),
            // Focus search
            KeyCode::Char('/') | KeyCode::Char('g') | KeyCode::Char('G') => {
                self.ui.active_section = ActiveSection::Search;
            }
            // Show help popup
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.ui.show_help_popup = true;
            }
            _ => {}
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let column = f64::from(mouse.column);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(track) = self.ui.track else {
                    return;
                };
                if !track_contains(&track, mouse.column, mouse.row) {
                    return;
                }
                match self.handle_at(&track, column) {
                    Some(handle) => {
                        self.begin_drag(handle, track);
                    }
                    None => self.click_track(column, track),
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => self.drag_to(column),
            MouseEventKind::Up(MouseButton::Left) => self.end_drag(),
            _ => {}
        }
    }

    /// The trim handle drawn within reach of `column`, nearest first.
    fn handle_at(&self, track: &TrackGeometry, column: f64) -> Option<TrimHandle> {
        let range = self.trim.range();
        let to_start = (track.column_of(range.start) - column).abs();
        let to_end = (track.column_of(range.end) - column).abs();
        if to_start.min(to_end) > HANDLE_REACH {
            None
        } else if to_start <= to_end {
            Some(TrimHandle::Start)
        } else {
            Some(TrimHandle::End)
        }
    }
}

fn track_contains(track: &TrackGeometry, column: u16, row: u16) -> bool {
    let column = f64::from(column);
    row == track.row && column >= track.left && column < track.left + track.width
}
