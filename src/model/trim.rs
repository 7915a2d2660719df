//! Trim range type and its clamping rules

use serde::{Deserialize, Serialize};

/// Minimum width of a trimmed segment, in percent of the total duration.
pub const MIN_SEGMENT: f64 = 5.0;

/// Slack for ranges clamped in floating point, where `start + MIN_SEGMENT`
/// can land one ulp short of the minimum width.
const WIDTH_TOLERANCE: f64 = 1e-9;

/// Playback window expressed as start/end percentages of the video duration.
///
/// A valid range satisfies `0 <= start < end <= 100` and
/// `end - start >= MIN_SEGMENT`. The full range `{0, 100}` means "no trim".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrimRange {
    pub start: f64,
    pub end: f64,
}

impl Default for TrimRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl TrimRange {
    pub const FULL: Self = Self {
        start: 0.0,
        end: 100.0,
    };

    pub fn is_full(&self) -> bool {
        self.start == 0.0 && self.end == 100.0
    }

    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.start >= 0.0
            && self.end <= 100.0
            && self.start < self.end
            && self.end - self.start >= MIN_SEGMENT - WIDTH_TOLERANCE
    }

    /// Clamps a candidate start against the current end.
    pub fn clamp_start(&self, value: f64) -> f64 {
        value.min(self.end - MIN_SEGMENT).max(0.0)
    }

    /// Clamps a candidate end against the current start.
    pub fn clamp_end(&self, value: f64) -> f64 {
        value.min(100.0).max(self.start + MIN_SEGMENT)
    }

    /// Forces the range back into the invariant, start first.
    pub fn sanitized(&self) -> Self {
        let start = self.start.min(100.0 - MIN_SEGMENT).max(0.0);
        let end = self.end.min(100.0);
        let end = if end - start >= MIN_SEGMENT - WIDTH_TOLERANCE {
            end
        } else {
            start + MIN_SEGMENT
        };
        Self { start, end }
    }

    pub fn start_time(&self, duration: f64) -> f64 {
        self.start / 100.0 * duration
    }

    pub fn end_time(&self, duration: f64) -> f64 {
        self.end / 100.0 * duration
    }

    /// Whether `time` lies in the half-open window `[start_time, end_time)`.
    pub fn contains_time(&self, time: f64, duration: f64) -> bool {
        time >= self.start_time(duration) && time < self.end_time(duration)
    }
}
