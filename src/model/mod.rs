//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (focus, tabs, UI state)
//! - `movie`: Movie records returned by the metadata API
//! - `content`: Content view data (browse feeds, detail, saved)
//! - `search`: Search mode state machine
//! - `storage`: Durable key-value slots
//! - `favorites`: Favorites store mirrored to storage
//! - `tmdb_client`: Movie metadata API client
//! - `app_model`: Main application model with state management methods

mod types;
mod movie;
mod content;
mod search;
mod storage;
mod favorites;
mod tmdb_client;
mod app_model;

pub use types::{ActiveSection, Tab, UiState};

pub use movie::{FavoriteRecord, Genre, MovieDetail, MoviePage, MovieSummary};

pub use content::{
    ContentState, ContentView, Feed, FeedKind, FeedStatus, HomeState, GRID_COLUMNS,
    saved_selection,
};

pub use search::{QueryChange, SearchMode, SearchState};

pub use storage::{FileStore, KeyValueStore, MemoryStore};

pub use favorites::{FavoritesStore, LoadState, ToggleOutcome};

pub use tmdb_client::{ImageUrls, MovieApi, TmdbClient};

pub use app_model::{AppModel, MoveDirection};
