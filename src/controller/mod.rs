//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and talks to the movie API.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `navigation`: Browse feeds, detail screen and back navigation
//! - `search`: Debounced search-as-you-type
//! - `favorites`: Favorite toggling from the detail screen

mod input;
mod navigation;
mod search;
mod favorites;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::error::ApiError;
use crate::model::{AppModel, FavoritesStore, MovieApi};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
    pub(crate) api: Arc<dyn MovieApi>,
    pub(crate) favorites: FavoritesStore,
    search_timer: Arc<Mutex<Option<JoinHandle<()>>>>,
    search_debounce: Duration,
}

impl AppController {
    pub fn new(
        model: Arc<AppModel>,
        api: Arc<dyn MovieApi>,
        favorites: FavoritesStore,
        search_debounce: Duration,
    ) -> Self {
        Self {
            model,
            api,
            favorites,
            search_timer: Arc::new(Mutex::new(None)),
            search_debounce,
        }
    }

    pub(crate) fn format_error(error: &ApiError) -> String {
        match error {
            ApiError::NotFound(_) => "Could not load movie details.".to_string(),
            ApiError::Status { status, .. } if status.as_u16() == 401 => {
                "Authentication failed. Check TMDB_API_ACCESS_TOKEN.".to_string()
            }
            ApiError::Status { status, .. } if status.as_u16() == 429 => {
                "Rate limited. Please wait a moment.".to_string()
            }
            ApiError::Network(e) if e.is_connect() || e.is_timeout() => {
                "Network unavailable. Check your connection.".to_string()
            }
            other => format!("Error: {}", other),
        }
    }
}
