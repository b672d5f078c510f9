//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared helpers (star ratings, movie cards and grids)
//! - `layout`: Top bar with search input and tabs, footer hints
//! - `content`: Main content area rendering
//! - `overlays`: Modal overlays (error, help)

mod utils;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, FavoriteRecord, HomeState, ImageUrls, UiState};
use content::ContentContext;

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        ui_state: &UiState,
        content_state: &ContentState,
        home_state: &HomeState,
        favorites: &[FavoriteRecord],
        favorites_ready: bool,
        image_urls: &ImageUrls,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + tabs
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state, home_state);

        let ctx = ContentContext {
            ui_state,
            content_state,
            home_state,
            favorites,
            favorites_ready,
            image_urls,
        };
        content::render_main_content(frame, chunks[1], &ctx);

        layout::render_footer(frame, chunks[2]);

        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
