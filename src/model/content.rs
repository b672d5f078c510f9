//! Content view state: browse feeds, search grid selection, detail and saved views.

use super::movie::{FavoriteRecord, MovieDetail, MovieSummary};
use super::search::SearchState;

/// Columns in the search result and saved grids
pub const GRID_COLUMNS: usize = 2;

/// The three browse carousels on the home screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedKind {
    NowPlaying,
    Popular,
    TopRated,
}

impl FeedKind {
    pub const ALL: [FeedKind; 3] = [FeedKind::NowPlaying, FeedKind::Popular, FeedKind::TopRated];

    pub fn title(self) -> &'static str {
        match self {
            FeedKind::NowPlaying => "Now Playing",
            FeedKind::Popular => "Popular",
            FeedKind::TopRated => "Top Rated",
        }
    }

    pub fn index(self) -> usize {
        match self {
            FeedKind::NowPlaying => 0,
            FeedKind::Popular => 1,
            FeedKind::TopRated => 2,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum FeedStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// One browse list with its own loading state
#[derive(Clone, Debug, Default)]
pub struct Feed {
    pub items: Vec<MovieSummary>,
    pub status: FeedStatus,
    pub selected_index: usize,
}

/// Home screen: browse feeds plus the search state that can replace them
#[derive(Clone, Debug, Default)]
pub struct HomeState {
    pub feeds: [Feed; 3],
    pub selected_feed: usize,
    pub search: SearchState,
    pub grid_index: usize,
}

impl HomeState {
    pub fn feed(&self, kind: FeedKind) -> &Feed {
        &self.feeds[kind.index()]
    }

    pub fn feed_mut(&mut self, kind: FeedKind) -> &mut Feed {
        &mut self.feeds[kind.index()]
    }

    /// True while any feed is still being fetched and no search has taken over
    pub fn is_browse_loading(&self) -> bool {
        !self.search.is_searching()
            && self
                .feeds
                .iter()
                .any(|feed| feed.status == FeedStatus::Loading)
    }

    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        if self.search.is_searching() {
            self.search.results.get(self.grid_index)
        } else {
            let feed = &self.feeds[self.selected_feed];
            feed.items.get(feed.selected_index)
        }
    }

    pub fn move_up(&mut self) {
        if self.search.is_searching() {
            self.grid_index = self.grid_index.saturating_sub(GRID_COLUMNS);
        } else {
            self.selected_feed = self.selected_feed.saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        if self.search.is_searching() {
            let next = self.grid_index + GRID_COLUMNS;
            if next < self.search.results.len() {
                self.grid_index = next;
            }
        } else if self.selected_feed + 1 < self.feeds.len() {
            self.selected_feed += 1;
        }
    }

    pub fn move_left(&mut self) {
        if self.search.is_searching() {
            self.grid_index = self.grid_index.saturating_sub(1);
        } else {
            let feed = &mut self.feeds[self.selected_feed];
            feed.selected_index = feed.selected_index.saturating_sub(1);
        }
    }

    pub fn move_right(&mut self) {
        if self.search.is_searching() {
            if self.grid_index + 1 < self.search.results.len() {
                self.grid_index += 1;
            }
        } else {
            let feed = &mut self.feeds[self.selected_feed];
            if feed.selected_index + 1 < feed.items.len() {
                feed.selected_index += 1;
            }
        }
    }
}

/// Represents the current view in the main content area
#[derive(Clone, Debug, Default)]
pub enum ContentView {
    #[default]
    Home,
    Saved {
        selected_index: usize,
    },
    MovieDetail {
        detail: MovieDetail,
        is_favorite: bool,
    },
    /// Detail request in flight; the previous view is on the navigation stack
    LoadingDetail {
        movie_id: u64,
    },
    /// Detail fetch failed for this id
    DetailUnavailable {
        movie_id: u64,
    },
}

/// State for the main content area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ContentView,
    pub navigation_stack: Vec<ContentView>,
    pub is_loading: bool,
    /// Detail request whose response may still replace the view
    pub pending_detail: Option<u64>,
}

/// Moves a grid cursor over `len` items laid out in [`GRID_COLUMNS`] columns.
pub fn grid_step(index: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = index as isize + delta;
    if target < 0 || target as usize >= len {
        index.min(len - 1)
    } else {
        target as usize
    }
}

/// Movie id under the saved-grid cursor.
pub fn saved_selection(favorites: &[FavoriteRecord], selected_index: usize) -> Option<u64> {
    favorites.get(selected_index).map(FavoriteRecord::id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movies(n: u64) -> Vec<MovieSummary> {
        (1..=n)
            .map(|id| MovieSummary {
                id,
                title: format!("M{id}"),
                poster_path: None,
                backdrop_path: None,
                vote_average: 0.0,
                release_date: None,
            })
            .collect()
    }

    #[test]
    fn carousel_navigation_stays_in_bounds() {
        let mut home = HomeState::default();
        home.feed_mut(FeedKind::Popular).items = movies(2);

        home.move_up();
        assert_eq!(home.selected_feed, 0);
        home.move_down();
        home.move_right();
        home.move_right();
        home.move_right();
        assert_eq!(home.selected_movie().map(|m| m.id), Some(2));

        home.move_down();
        home.move_down();
        assert_eq!(home.selected_feed, 2);
        assert!(home.selected_movie().is_none());
    }

    #[test]
    fn grid_navigation_moves_by_rows_in_search_mode() {
        let mut home = HomeState::default();
        home.search.set_query("m".into());
        home.search.results = movies(5);

        home.move_down();
        home.move_down();
        assert_eq!(home.grid_index, 4);
        home.move_down();
        assert_eq!(home.grid_index, 4);
        home.move_up();
        home.move_right();
        assert_eq!(home.selected_movie().map(|m| m.id), Some(4));
    }

    #[test]
    fn browse_loading_ignores_finished_and_failed_feeds() {
        let mut home = HomeState::default();
        home.feed_mut(FeedKind::NowPlaying).status = FeedStatus::Loaded;
        home.feed_mut(FeedKind::Popular).status = FeedStatus::Failed("boom".into());
        assert!(!home.is_browse_loading());

        home.feed_mut(FeedKind::TopRated).status = FeedStatus::Loading;
        assert!(home.is_browse_loading());

        home.search.set_query("x".into());
        assert!(!home.is_browse_loading());
    }

    #[test]
    fn grid_step_clamps() {
        assert_eq!(grid_step(0, 0, 1), 0);
        assert_eq!(grid_step(3, 4, 2), 3);
        assert_eq!(grid_step(1, 4, -2), 1);
        assert_eq!(grid_step(1, 4, 2), 3);
    }
}
