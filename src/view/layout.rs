//! Layout rendering (top bar with search input and tab bar, footer hints)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Tabs},
    Frame,
};

use crate::model::{ActiveSection, HomeState, Tab, UiState};
use super::utils::border_style;

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, home_state: &HomeState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(22), // Tabs
        ])
        .split(area);

    let search_focused =
        ui_state.active_tab == Tab::Home && ui_state.active_section == ActiveSection::Search;

    let query = &home_state.search.query;
    let (search_text, search_style) = if ui_state.active_tab != Tab::Home {
        ("Search is available on Home", Style::default().fg(Color::DarkGray))
    } else if query.is_empty() {
        ("Search movies...", Style::default().fg(Color::DarkGray))
    } else if search_focused {
        (query.as_str(), Style::default().fg(Color::Green))
    } else {
        (query.as_str(), Style::default().fg(Color::White))
    };

    let mut title = String::from(" Search ");
    if home_state.search.is_loading() {
        title.push_str("(searching...) ");
    }

    let search = Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .padding(Padding::horizontal(1))
            .border_style(border_style(search_focused)),
    );
    frame.render_widget(search, chunks[0]);

    let selected = match ui_state.active_tab {
        Tab::Home => 0,
        Tab::Saved => 1,
    };
    let tabs = Tabs::new([Tab::Home.title(), Tab::Saved.title()])
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(tabs, chunks[1]);
}

pub fn render_footer(frame: &mut Frame, area: Rect) {
    let hint = |key: &'static str, desc: &'static str| {
        [
            Span::styled(key, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {desc}  "), Style::default().fg(Color::DarkGray)),
        ]
    };

    let spans: Vec<Span> = [
        hint("Tab", "focus"),
        hint("Enter", "open"),
        hint("f", "favorite"),
        hint("Esc", "back"),
        hint("1/2", "tabs"),
        hint("?", "help"),
        hint("q", "quit"),
    ]
    .into_iter()
    .flatten()
    .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
