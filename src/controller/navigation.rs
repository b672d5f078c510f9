//! Navigation-related controller methods (browse feeds, detail screen, back)

use crate::error::ApiError;
use crate::model::{ContentView, FeedKind, MoviePage, Tab, saved_selection};
use super::AppController;

impl AppController {
    /// Fetches the three browse feeds concurrently. Each feed is updated as
    /// soon as its own request settles, so one failure leaves the others intact.
    pub async fn load_browse_feeds(&self) {
        tracing::debug!("Loading browse feeds");
        futures::join!(
            self.load_feed(FeedKind::NowPlaying),
            self.load_feed(FeedKind::Popular),
            self.load_feed(FeedKind::TopRated),
        );
    }

    async fn load_feed(&self, kind: FeedKind) {
        self.model.set_feed_loading(kind).await;

        let result: Result<MoviePage, ApiError> = match kind {
            FeedKind::NowPlaying => self.api.fetch_now_playing().await,
            FeedKind::Popular => self.api.fetch_popular().await,
            FeedKind::TopRated => self.api.fetch_top_rated().await,
        };

        match result {
            Ok(page) => {
                tracing::info!(feed = kind.title(), count = page.results.len(), "Feed loaded");
                self.model.set_feed_items(kind, page.results).await;
            }
            Err(e) => {
                self.model.set_feed_failed(kind, Self::format_error(&e)).await;
            }
        }
    }

    /// Opens the detail screen for `movie_id`, fetching it fresh.
    pub async fn open_movie_detail(&self, movie_id: u64) {
        tracing::debug!(movie_id, "Opening movie detail");
        self.model.begin_detail(movie_id).await;

        match self.api.fetch_movie_detail(movie_id).await {
            Ok(detail) => {
                let is_favorite = self.favorites.is_favorite(movie_id).await;
                if !self.model.set_movie_detail(detail, is_favorite).await {
                    tracing::debug!(movie_id, "Detail arrived after navigating away");
                }
            }
            Err(e) => {
                if self.model.set_detail_unavailable(movie_id).await {
                    self.model.set_error(Self::format_error(&e)).await;
                }
            }
        }
    }

    /// Opens whatever movie is under the cursor in the current view.
    pub async fn open_selected(&self) {
        let selected = match self.model.current_view().await {
            ContentView::Home => self.model.selected_home_movie().await,
            ContentView::Saved { selected_index } => {
                let favorites = self.favorites.list_favorites().await;
                saved_selection(&favorites, selected_index)
            }
            ContentView::MovieDetail { .. }
            | ContentView::LoadingDetail { .. }
            | ContentView::DetailUnavailable { .. } => None,
        };

        if let Some(movie_id) = selected {
            self.open_movie_detail(movie_id).await;
        }
    }

    pub async fn go_back(&self) {
        if !self.model.navigate_back().await {
            tracing::trace!("Already at the root view");
        }
    }

    pub async fn switch_tab(&self, tab: Tab) {
        tracing::debug!(tab = tab.title(), "Switching tab");
        self.model.switch_tab(tab).await;
    }
}
