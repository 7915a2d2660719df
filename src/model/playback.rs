//! Playback state as seen by the rest of the application

use std::fmt::{Display, Formatter};

/// Errors reported by the player, normalized from SDK codes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerError {
    InvalidParameter,
    Html5,
    NotFound,
    EmbeddingNotAllowed,
    Unknown(i32),
    InitializationFailed(String),
    Transport(&'static str),
}

impl PlayerError {
    /// Maps an SDK error code onto a category. Unmapped codes pass through.
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => Self::InvalidParameter,
            5 => Self::Html5,
            100 => Self::NotFound,
            101 | 150 => Self::EmbeddingNotAllowed,
            other => Self::Unknown(other),
        }
    }

    /// Whether the error replaces the player view with the error panel.
    /// Transport failures only get a status line.
    pub fn is_fatal_to_view(&self) -> bool {
        !matches!(self, Self::Transport(_))
    }
}

impl Display for PlayerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "Invalid video parameter."),
            Self::Html5 => write!(f, "An HTML5 player error occurred."),
            Self::NotFound => {
                write!(f, "Video not found. It may have been removed or set to private.")
            }
            Self::EmbeddingNotAllowed => {
                write!(f, "The video owner does not allow this video to be embedded.")
            }
            Self::Unknown(code) => write!(f, "Player error code: {code}"),
            Self::InitializationFailed(reason) => {
                write!(f, "Failed to initialize player: {reason}")
            }
            Self::Transport(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for PlayerError {}

/// Normalized playback state owned by the player adapter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackState {
    pub ready: bool,
    pub playing: bool,
    /// Seconds.
    pub current_time: f64,
    /// Seconds; 0 until the player reports it.
    pub duration: f64,
    pub error: Option<PlayerError>,
}

impl PlaybackState {
    pub fn progress_percent(&self) -> f64 {
        if self.duration > 0.0 {
            self.current_time / self.duration * 100.0
        } else {
            0.0
        }
    }

    /// Ready, playing and with a known duration.
    pub fn is_running(&self) -> bool {
        self.ready && self.playing && self.duration > 0.0
    }
}
