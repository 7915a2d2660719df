//! Core type definitions for the application

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Opaque key naming one video across selection, player session and stored trims.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which section of the UI is currently active/focused
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Videos,
    Player,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Videos,
            ActiveSection::Videos => ActiveSection::Player,
            ActiveSection::Player => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Player,
            ActiveSection::Videos => ActiveSection::Search,
            ActiveSection::Player => ActiveSection::Videos,
        }
    }
}

/// Which trim handle a drag gesture moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrimHandle {
    Start,
    End,
}

/// Horizontal geometry of the scrub track, in screen units.
///
/// `inset` is the padding on each side that clicks must discount.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrackGeometry {
    pub left: f64,
    pub width: f64,
    pub inset: f64,
    /// Row of the track, used to route mouse presses.
    pub row: u16,
}

impl TrackGeometry {
    pub fn inner_left(&self) -> f64 {
        self.left + self.inset
    }

    pub fn inner_width(&self) -> f64 {
        self.width - self.inset * 2.0
    }

    /// Maps an x coordinate to a percentage of the inner track, clamped to [0, 100].
    pub fn percent_at(&self, x: f64) -> Option<f64> {
        let width = self.inner_width();
        if width <= 0.0 {
            return None;
        }
        let offset = (x - self.inner_left()).max(0.0).min(width);
        Some(offset / width * 100.0)
    }

    /// Screen column where a percentage is drawn.
    pub fn column_of(&self, percent: f64) -> f64 {
        let width = self.inner_width().max(1.0);
        let column = self.inner_left() + percent / 100.0 * width;
        column.min(self.inner_left() + width - 1.0)
    }
}

/// UI state for the application
#[derive(Clone, Debug)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub video_selected: usize,
    pub show_help_popup: bool,
    pub should_quit: bool,
    /// Track geometry from the last rendered frame.
    pub track: Option<TrackGeometry>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Videos,
            search_query: String::new(),
            video_selected: 0,
            show_help_popup: false,
            should_quit: false,
            track: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_at_discounts_inset_and_clamps() {
        let track = TrackGeometry {
            left: 100.0,
            width: 224.0,
            inset: 12.0,
            row: 0,
        };
        assert_eq!(track.percent_at(112.0), Some(0.0));
        assert_eq!(track.percent_at(212.0), Some(50.0));
        assert_eq!(track.percent_at(400.0), Some(100.0));
        assert_eq!(track.percent_at(0.0), Some(0.0));
    }

    #[test]
    fn degenerate_track_has_no_position() {
        let track = TrackGeometry {
            left: 0.0,
            width: 2.0,
            inset: 1.0,
            row: 0,
        };
        assert_eq!(track.percent_at(1.0), None);
    }
}
