//! Main application model with state management

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::content::{ContentState, ContentView, FeedKind, FeedStatus, HomeState};
use super::movie::{MovieDetail, MovieSummary};
use super::search::{QueryChange, SearchTicket};
use super::types::{ActiveSection, Tab, UiState};

const ERROR_DISPLAY_TIME: Duration = Duration::from_secs(5);

/// Main application model containing all state
pub struct AppModel {
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    pub home: Arc<Mutex<HomeState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            home: Arc::new(Mutex::new(HomeState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn get_home_state(&self) -> HomeState {
        self.home.lock().await.clone()
    }

    // ========================================================================
    // Focus, tabs, overlays
    // ========================================================================

    pub async fn cycle_section(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        self.ui_state.lock().await.active_section = section;
    }

    /// Switches tab and resets the content stack to that tab's root view.
    pub async fn switch_tab(&self, tab: Tab) {
        {
            let mut ui = self.ui_state.lock().await;
            ui.active_tab = tab;
            if tab == Tab::Saved {
                ui.active_section = ActiveSection::MainContent;
            }
        }

        let mut content = self.content_state.lock().await;
        content.navigation_stack.clear();
        content.is_loading = false;
        content.pending_detail = None;
        content.view = match tab {
            Tab::Home => ContentView::Home,
            Tab::Saved => ContentView::Saved { selected_index: 0 },
        };
    }

    pub async fn set_error(&self, message: String) {
        let mut ui = self.ui_state.lock().await;
        ui.error_message = Some(message);
        ui.error_timestamp = Some(Instant::now());
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn clear_error(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.error_message = None;
        ui.error_timestamp = None;
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut ui = self.ui_state.lock().await;
        if ui
            .error_timestamp
            .is_some_and(|at| at.elapsed() >= ERROR_DISPLAY_TIME)
        {
            ui.error_message = None;
            ui.error_timestamp = None;
        }
    }

    pub async fn toggle_help_popup(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.show_help_popup = !ui.show_help_popup;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Browse feeds
    // ========================================================================

    pub async fn set_feed_loading(&self, kind: FeedKind) {
        self.home.lock().await.feed_mut(kind).status = FeedStatus::Loading;
    }

    pub async fn set_feed_items(&self, kind: FeedKind, items: Vec<MovieSummary>) {
        let mut home = self.home.lock().await;
        let feed = home.feed_mut(kind);
        feed.items = items;
        feed.selected_index = 0;
        feed.status = FeedStatus::Loaded;
    }

    pub async fn set_feed_failed(&self, kind: FeedKind, message: String) {
        let mut home = self.home.lock().await;
        let feed = home.feed_mut(kind);
        feed.items.clear();
        feed.status = FeedStatus::Failed(message);
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub async fn update_search_query(&self, text: String) -> QueryChange {
        let mut home = self.home.lock().await;
        home.grid_index = 0;
        home.search.set_query(text)
    }

    pub async fn get_search_query(&self) -> String {
        self.home.lock().await.search.query.clone()
    }

    pub async fn commit_search(&self, query: &str) -> Option<SearchTicket> {
        self.home.lock().await.search.commit(query)
    }

    pub async fn apply_search_response(
        &self,
        seq: u64,
        response: Result<Vec<MovieSummary>, String>,
    ) -> bool {
        let mut home = self.home.lock().await;
        let applied = home.search.apply_response(seq, response);
        if applied {
            home.grid_index = 0;
        }
        applied
    }

    // ========================================================================
    // Content navigation
    // ========================================================================

    /// Pushes the current view and marks `movie_id` as the detail being loaded.
    /// A request already in flight is superseded without growing the stack.
    pub async fn begin_detail(&self, movie_id: u64) {
        let mut content = self.content_state.lock().await;
        let current = std::mem::replace(&mut content.view, ContentView::LoadingDetail { movie_id });
        if !matches!(current, ContentView::LoadingDetail { .. }) {
            content.navigation_stack.push(current);
        }
        content.is_loading = true;
        content.pending_detail = Some(movie_id);
    }

    /// Shows the detail if it is still the one the user is waiting for.
    pub async fn set_movie_detail(&self, detail: MovieDetail, is_favorite: bool) -> bool {
        let mut content = self.content_state.lock().await;
        if content.pending_detail != Some(detail.summary.id) {
            return false;
        }
        content.pending_detail = None;
        content.is_loading = false;
        content.view = ContentView::MovieDetail { detail, is_favorite };
        true
    }

    pub async fn set_detail_unavailable(&self, movie_id: u64) -> bool {
        let mut content = self.content_state.lock().await;
        if content.pending_detail != Some(movie_id) {
            return false;
        }
        content.pending_detail = None;
        content.is_loading = false;
        content.view = ContentView::DetailUnavailable { movie_id };
        true
    }

    pub async fn current_detail(&self) -> Option<MovieDetail> {
        match &self.content_state.lock().await.view {
            ContentView::MovieDetail { detail, .. } => Some(detail.clone()),
            _ => None,
        }
    }

    pub async fn set_detail_favorite(&self, movie_id: u64, favorite: bool) {
        let mut content = self.content_state.lock().await;
        if let ContentView::MovieDetail { detail, is_favorite } = &mut content.view {
            if detail.summary.id == movie_id {
                *is_favorite = favorite;
            }
        }
    }

    /// Pops the navigation stack. Returns `false` when already at a root view.
    pub async fn navigate_back(&self) -> bool {
        let mut content = self.content_state.lock().await;
        match content.navigation_stack.pop() {
            Some(previous) => {
                content.view = previous;
                content.is_loading = false;
                content.pending_detail = None;
                true
            }
            None => false,
        }
    }

    pub async fn current_view(&self) -> ContentView {
        self.content_state.lock().await.view.clone()
    }

    pub async fn move_saved_selection(&self, delta: isize, len: usize) {
        let mut content = self.content_state.lock().await;
        if let ContentView::Saved { selected_index } = &mut content.view {
            *selected_index = super::content::grid_step(*selected_index, len, delta);
        }
    }

    pub async fn home_move(&self, direction: MoveDirection) {
        let mut home = self.home.lock().await;
        match direction {
            MoveDirection::Up => home.move_up(),
            MoveDirection::Down => home.move_down(),
            MoveDirection::Left => home.move_left(),
            MoveDirection::Right => home.move_right(),
        }
    }

    pub async fn selected_home_movie(&self) -> Option<u64> {
        self.home.lock().await.selected_movie().map(|m| m.id)
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}
