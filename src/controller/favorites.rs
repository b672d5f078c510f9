//! Favorite toggling from the detail screen

use crate::model::{FavoriteRecord, ToggleOutcome};
use super::AppController;

impl AppController {
    /// Toggles the movie shown on the detail screen. Does nothing elsewhere.
    pub async fn toggle_favorite(&self) {
        let Some(detail) = self.model.current_detail().await else {
            return;
        };
        let movie_id = detail.summary.id;

        let favorite = match self.favorites.toggle_favorite(FavoriteRecord::from(&detail)).await {
            ToggleOutcome::Added => true,
            ToggleOutcome::Removed => false,
            ToggleOutcome::Queued => {
                tracing::debug!(movie_id, "Favorites still loading, toggle queued");
                self.favorites.projected_favorite(movie_id).await
            }
        };

        self.model.set_detail_favorite(movie_id, favorite).await;
    }

    /// Loads the favorites slot, then re-reads the flag of any open detail so
    /// it reflects stored favorites and replayed toggles.
    pub async fn load_favorites(&self) {
        self.favorites.load().await;

        if let Some(detail) = self.model.current_detail().await {
            let movie_id = detail.summary.id;
            let favorite = self.favorites.is_favorite(movie_id).await;
            tracing::debug!(movie_id, favorite, "Synced detail favorite flag after load");
            self.model.set_detail_favorite(movie_id, favorite).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::controller::testing::{FakeApi, controller, controller_with_storage};
    use crate::model::{ContentView, MemoryStore};

    async fn detail_flag(controller: &crate::controller::AppController) -> Option<bool> {
        match controller.model.current_view().await {
            ContentView::MovieDetail { is_favorite, .. } => Some(is_favorite),
            _ => None,
        }
    }

    #[tokio::test]
    async fn favorite_state_follows_reopened_detail() {
        let controller = controller(Arc::new(FakeApi::default()));
        controller.favorites.load().await;

        controller.open_movie_detail(42).await;
        assert_eq!(detail_flag(&controller).await, Some(false));
        controller.toggle_favorite().await;
        assert_eq!(detail_flag(&controller).await, Some(true));

        controller.go_back().await;
        controller.open_movie_detail(42).await;
        assert_eq!(detail_flag(&controller).await, Some(true));

        controller.toggle_favorite().await;
        controller.go_back().await;
        controller.open_movie_detail(42).await;
        assert_eq!(detail_flag(&controller).await, Some(false));
    }

    #[tokio::test]
    async fn favorited_detail_is_persisted_with_its_extra_fields() {
        let storage = MemoryStore::new();
        let controller = controller_with_storage(Arc::new(FakeApi::default()), storage.clone());
        controller.favorites.load().await;

        controller.open_movie_detail(42).await;
        controller.toggle_favorite().await;

        let restarted = controller_with_storage(Arc::new(FakeApi::default()), storage);
        restarted.favorites.load().await;
        let saved = restarted.favorites.list_favorites().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id(), 42);
        assert_eq!(saved[0].extra["runtime"], 121);
    }

    #[tokio::test]
    async fn toggle_outside_detail_is_ignored() {
        let controller = controller(Arc::new(FakeApi::default()));
        controller.favorites.load().await;

        controller.toggle_favorite().await;

        assert!(controller.favorites.list_favorites().await.is_empty());
    }

    #[tokio::test]
    async fn two_toggles_while_loading_cancel_out() {
        let controller = controller(Arc::new(FakeApi::default()));

        controller.open_movie_detail(42).await;
        controller.toggle_favorite().await;
        assert_eq!(detail_flag(&controller).await, Some(true));
        controller.toggle_favorite().await;
        assert_eq!(detail_flag(&controller).await, Some(false));

        controller.load_favorites().await;
        assert!(!controller.favorites.is_favorite(42).await);
        assert_eq!(detail_flag(&controller).await, Some(false));
    }

    #[tokio::test]
    async fn stored_favorite_shows_after_load_completes() {
        let storage = MemoryStore::new();
        let seeded = controller_with_storage(Arc::new(FakeApi::default()), storage.clone());
        seeded.load_favorites().await;
        seeded.open_movie_detail(42).await;
        seeded.toggle_favorite().await;

        let controller = controller_with_storage(Arc::new(FakeApi::default()), storage);
        controller.open_movie_detail(42).await;
        assert_eq!(detail_flag(&controller).await, Some(false));

        controller.load_favorites().await;
        assert_eq!(detail_flag(&controller).await, Some(true));
    }

    #[tokio::test]
    async fn queued_toggle_of_stored_favorite_removes_it() {
        let storage = MemoryStore::new();
        let seeded = controller_with_storage(Arc::new(FakeApi::default()), storage.clone());
        seeded.load_favorites().await;
        seeded.open_movie_detail(42).await;
        seeded.toggle_favorite().await;

        let controller = controller_with_storage(Arc::new(FakeApi::default()), storage);
        controller.open_movie_detail(42).await;
        controller.toggle_favorite().await;
        controller.load_favorites().await;
        assert!(!controller.favorites.is_favorite(42).await);
        assert_eq!(detail_flag(&controller).await, Some(false));
    }

    #[tokio::test]
    async fn toggle_while_loading_flips_the_displayed_flag() {
        let controller = controller(Arc::new(FakeApi::default()));

        controller.open_movie_detail(42).await;
        controller.toggle_favorite().await;
        assert_eq!(detail_flag(&controller).await, Some(true));

        controller.favorites.load().await;
        assert!(controller.favorites.is_favorite(42).await);
    }
}
