//! Layout rendering (search bar, video list, player panel)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{ActiveSection, PlaybackState, UiState, VideoEntry, VideoId};
use crate::player::SessionPhase;
use super::utils::{render_scrollable_list, truncate_string};

fn section_border(ui_state: &UiState, section: ActiveSection) -> Style {
    if ui_state.active_section == section {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, phase: &SessionPhase) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(24), // Player status
        ])
        .split(area);

    let search_style = if ui_state.active_section == ActiveSection::Search {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.search_query.is_empty() {
        "Type to search..."
    } else {
        &ui_state.search_query
    };

    let search = Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .padding(Padding::horizontal(1))
            .border_style(section_border(ui_state, ActiveSection::Search)),
    );
    frame.render_widget(search, chunks[0]);

    let (status, color) = match phase {
        SessionPhase::Uninitialized => ("No video".to_string(), Color::DarkGray),
        SessionPhase::Initializing { attempts } => (format!("Loading ({attempts})"), Color::Yellow),
        SessionPhase::Ready => ("Ready".to_string(), Color::Green),
        SessionPhase::Error(_) => ("Error".to_string(), Color::Red),
        SessionPhase::Destroyed => ("Stopped".to_string(), Color::DarkGray),
    };
    let status = Paragraph::new(status)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title(" Player "));
    frame.render_widget(status, chunks[1]);
}

pub fn render_video_list(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    videos: &[&VideoEntry],
    current: Option<&VideoId>,
) {
    let title_width = area.width.saturating_sub(8) as usize;
    let items: Vec<ListItem> = videos
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let is_current = current == Some(&entry.id);
            let marker = if is_current { "▶ " } else { "  " };
            let style = if i == ui_state.video_selected && ui_state.active_section == ActiveSection::Videos {
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!("{}{}", marker, truncate_string(&entry.title, title_width))).style(style)
        })
        .collect();

    let title = format!(" Videos ({}) ", videos.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(section_border(ui_state, ActiveSection::Videos));

    render_scrollable_list(frame, area, items, ui_state.video_selected, block);
}

pub fn render_player_info(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    entry: Option<&VideoEntry>,
    playback: &PlaybackState,
    phase: &SessionPhase,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Player ")
        .padding(Padding::horizontal(1))
        .border_style(section_border(ui_state, ActiveSection::Player));

    let Some(entry) = entry else {
        let hint = Paragraph::new("Select a video from the list").block(block);
        frame.render_widget(hint, area);
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        entry.title.clone(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))];

    let mut meta = Vec::new();
    if !entry.channel.is_empty() {
        meta.push(entry.channel.clone());
    }
    if let Some(published) = entry.published_at {
        meta.push(published.format("%Y-%m-%d").to_string());
    }
    if !meta.is_empty() {
        lines.push(Line::from(Span::styled(meta.join(" · "), Style::default().fg(Color::Cyan))));
    }
    lines.push(Line::from(""));

    if !playback.ready {
        let text = match phase {
            SessionPhase::Initializing { attempts } if *attempts > 1 => {
                format!("Loading player... (attempt {attempts})")
            }
            _ => "Loading player...".to_string(),
        };
        lines.push(Line::from(Span::styled(text, Style::default().fg(Color::Yellow))));
    } else if let Some(error) = &playback.error {
        // Transport failures keep the session; show them inline
        lines.push(Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))));
    }
    lines.push(Line::from(""));

    if !entry.description.is_empty() {
        lines.push(Line::from(Span::styled(
            entry.description.clone(),
            Style::default().fg(Color::Gray),
        )));
    }

    let info = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(info, area);
}
