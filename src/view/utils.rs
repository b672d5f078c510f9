//! Utility functions for rendering UI components

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::MovieSummary;

pub const CARD_WIDTH: u16 = 26;
pub const CARD_HEIGHT: u16 = 4;

const STAR_COUNT: usize = 5;

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// Five-star rendering of a 0–10 score: full stars for each whole point out of
/// five, a half star when the remainder is at least one half.
pub fn rating_stars(score: f64) -> String {
    let rating = (score / 2.0).clamp(0.0, STAR_COUNT as f64);
    let full = rating.floor() as usize;
    let half = rating - full as f64 >= 0.5;
    let empty = STAR_COUNT - full - usize::from(half);

    let mut stars = "★".repeat(full);
    if half {
        stars.push('⯪');
    }
    stars.push_str(&"☆".repeat(empty));
    stars
}

pub fn release_year_label(movie: &MovieSummary) -> String {
    movie
        .release_year()
        .map(|year| year.to_string())
        .unwrap_or_else(|| "----".to_string())
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

/// First index of a window of `visible` items that keeps `selected` in view.
pub fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        0
    } else {
        selected.saturating_sub(visible - 1)
    }
}

/// A small bordered card: title on the first line, stars, score and year on the second.
pub fn render_movie_card(
    frame: &mut Frame,
    area: Rect,
    movie: &MovieSummary,
    selected: bool,
    favorite: bool,
) {
    let inner_width = area.width.saturating_sub(4) as usize;
    let title_style = if selected {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let heart = if favorite { "♥ " } else { "" };
    let lines = vec![
        Line::from(Span::styled(
            truncate_string(&format!("{heart}{}", movie.title), inner_width),
            title_style,
        )),
        Line::from(vec![
            Span::styled(rating_stars(movie.vote_average), Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(" {:.1} {}", movie.vote_average, release_year_label(movie)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(if selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            }),
    );
    frame.render_widget(card, area);
}

/// Lays out `movies` as a grid with `columns` columns, scrolled to keep `selected` visible.
pub fn render_movie_grid(
    frame: &mut Frame,
    area: Rect,
    movies: &[&MovieSummary],
    columns: usize,
    selected: Option<usize>,
    is_favorite: impl Fn(u64) -> bool,
) {
    let visible_rows = (area.height / CARD_HEIGHT) as usize;
    if visible_rows == 0 || columns == 0 {
        return;
    }

    let selected_row = selected.map(|i| i / columns).unwrap_or(0);
    let first_row = scroll_offset(selected_row, visible_rows);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(area);

    for (slot, row_area) in row_areas.iter().enumerate() {
        let row = first_row + slot;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let index = row * columns + col;
            if let Some(movie) = movies.get(index) {
                render_movie_card(
                    frame,
                    *cell,
                    movie,
                    selected == Some(index),
                    is_favorite(movie.id),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_round_down_to_halves() {
        assert_eq!(rating_stars(10.0), "★★★★★");
        assert_eq!(rating_stars(7.4), "★★★☆☆");
        assert_eq!(rating_stars(7.0), "★★★⯪☆");
        assert_eq!(rating_stars(0.0), "☆☆☆☆☆");
        assert_eq!(rating_stars(-3.0), "☆☆☆☆☆");
        assert_eq!(rating_stars(12.0), "★★★★★");
    }

    #[test]
    fn truncation_pads_and_ellipsizes() {
        assert_eq!(truncate_string("Heat", 6), "Heat  ");
        assert_eq!(truncate_string("The Godfather", 8), "The G...");
    }

    #[test]
    fn scroll_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 3), 0);
        assert_eq!(scroll_offset(2, 3), 0);
        assert_eq!(scroll_offset(5, 3), 3);
        assert_eq!(scroll_offset(5, 0), 0);
    }
}
