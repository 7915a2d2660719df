//! Trim track rendering: scrub bar, trim handles and time labels

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{PlaybackState, TrackGeometry, TrimHandle, TrimRange};
use super::utils::format_time;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Padding,
    Outside,
    Played,
    Window,
    Playhead,
    Handle(TrimHandle),
}

/// Classifies every column of the track row, insets included.
fn track_cells(track: &TrackGeometry, range: TrimRange, progress: Option<f64>) -> Vec<Cell> {
    let left = track.left.round() as i64;
    let inner_left = track.inner_left().round() as i64;
    let inner_right = (track.inner_left() + track.inner_width()).round() as i64;
    let start_col = track.column_of(range.start).round() as i64;
    let end_col = track.column_of(range.end).round() as i64;
    let head_col = progress.map(|p| track.column_of(p.clamp(0.0, 100.0)).round() as i64);

    (0..track.width.max(0.0) as i64)
        .map(|offset| {
            let col = left + offset;
            if col < inner_left || col >= inner_right {
                Cell::Padding
            } else if col == start_col {
                Cell::Handle(TrimHandle::Start)
            } else if col == end_col {
                Cell::Handle(TrimHandle::End)
            } else if Some(col) == head_col {
                Cell::Playhead
            } else if col < start_col || col > end_col {
                Cell::Outside
            } else if head_col.is_some_and(|head| col < head) {
                Cell::Played
            } else {
                Cell::Window
            }
        })
        .collect()
}

fn cell_span(cell: Cell, dragging: Option<TrimHandle>) -> Span<'static> {
    match cell {
        Cell::Padding => Span::raw(" "),
        Cell::Outside => Span::styled("─", Style::default().fg(Color::DarkGray)),
        Cell::Played => Span::styled("━", Style::default().fg(Color::Cyan)),
        Cell::Window => Span::styled("━", Style::default().fg(Color::Green)),
        Cell::Playhead => Span::styled("●", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Cell::Handle(handle) => {
            let style = if dragging == Some(handle) {
                Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            };
            Span::styled("┃", style)
        }
    }
}

/// Draws the track and returns where it landed so pointer input can be mapped back.
pub fn render_trim_track(
    frame: &mut Frame,
    area: Rect,
    playback: &PlaybackState,
    range: TrimRange,
    inset: u16,
    dragging: Option<TrimHandle>,
) -> Option<TrackGeometry> {
    let title = if range.is_full() {
        " Trim: full video ".to_string()
    } else {
        format!(" Trim: {:.1}% - {:.1}% ", range.start, range.end)
    };
    let hints = " drag ┃ to trim | click to seek | r reset ";

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(Line::from(hints).right_aligned());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 || inner.width <= inset.saturating_mul(2).saturating_add(1) {
        return None;
    }

    let track = TrackGeometry {
        left: f64::from(inner.x),
        width: f64::from(inner.width),
        inset: f64::from(inset),
        row: inner.y,
    };

    let progress = (playback.duration > 0.0).then(|| playback.progress_percent());
    let spans: Vec<Span> = track_cells(&track, range, progress)
        .into_iter()
        .map(|cell| cell_span(cell, dragging))
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect { height: 1, ..inner },
    );

    let duration = playback.duration;
    let status = if playback.playing { "▶" } else { "⏸" };
    let labels = Line::from(vec![
        Span::styled(
            format!(" start {} ", format_time(range.start_time(duration))),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(format!(
            " {} {} / {} ",
            status,
            format_time(playback.current_time),
            format_time(duration)
        )),
        Span::styled(
            format!(" end {} ", format_time(range.end_time(duration))),
            Style::default().fg(Color::Yellow),
        ),
    ])
    .centered();
    frame.render_widget(
        Paragraph::new(labels),
        Rect {
            y: inner.y + 1,
            height: 1,
            ..inner
        },
    );

    Some(track)
}
