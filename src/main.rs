mod config;
mod controller;
mod error;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use anyhow::Result;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::Config;
use controller::AppController;
use model::{
    AppModel, FavoritesStore, FileStore, ImageUrls, KeyValueStore, LoadState, MemoryStore,
    TmdbClient,
};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== movies-rs starting ===");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    let storage = open_storage(&config);
    let favorites = FavoritesStore::new(storage);
    let api = Arc::new(TmdbClient::new(&config)?);
    let image_urls = ImageUrls::new(config.image_base.clone());
    let model = Arc::new(AppModel::new());

    let controller = AppController::new(
        model.clone(),
        api,
        favorites.clone(),
        config.search_debounce,
    );

    // Favorites and feeds load in the background while the first frame draws
    let controller_for_favorites = controller.clone();
    tokio::spawn(async move {
        controller_for_favorites.load_favorites().await;
    });

    let controller_for_feeds = controller.clone();
    tokio::spawn(async move {
        controller_for_feeds.load_browse_feeds().await;
    });

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, favorites, &image_urls, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("movies-rs shutting down");
    Ok(())
}

/// File-backed storage under the data directory, or an in-memory store when
/// that directory cannot be created.
fn open_storage(config: &Config) -> Arc<dyn KeyValueStore> {
    match std::fs::create_dir_all(&config.data_dir) {
        Ok(()) => {
            let store = FileStore::new(config.data_dir.clone());
            tracing::debug!(dir = ?store.dir(), "Using file storage");
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!(
                dir = ?config.data_dir,
                error = %e,
                "Data directory unavailable, favorites will not survive a restart"
            );
            Arc::new(MemoryStore::new())
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    favorites: FavoritesStore,
    image_urls: &ImageUrls,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Auto-clear old errors (after 5 seconds)
        model.auto_clear_old_errors().await;

        let ui_state = model.get_ui_state().await;
        let content_state = model.get_content_state().await;
        let home_state = model.get_home_state().await;
        let saved = favorites.list_favorites().await;
        let saved_ready = favorites.load_state().await == LoadState::Ready;
        let should_quit = model.should_quit().await;

        terminal.draw(|f| {
            AppView::render(
                f,
                &ui_state,
                &content_state,
                &home_state,
                &saved,
                saved_ready,
                image_urls,
            );
        })?;

        if should_quit {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                controller.handle_key_event(key).await;
            }
        }
    }

    Ok(())
}
