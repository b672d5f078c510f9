//! Favorites store: the in-memory list of favorite movies mirrored to a
//! single durable slot.
//!
//! The store starts `Uninitialized`, reads the slot once in [`FavoritesStore::load`]
//! and only then becomes `Ready`. Toggles that arrive before that are queued and
//! replayed on top of the loaded collection, so an early toggle can never
//! overwrite favorites that were persisted by a previous run.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use super::movie::FavoriteRecord;
use super::storage::KeyValueStore;
use crate::error::PersistenceError;

pub const FAVORITES_KEY: &str = "movie_favorites";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Uninitialized,
    Loading,
    Ready,
}

/// What a toggle did to the collection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The store is still loading; the toggle runs once loading completes.
    Queued,
}

struct FavoritesInner {
    state: LoadState,
    favorites: Vec<FavoriteRecord>,
    pending: Vec<FavoriteRecord>,
}

impl FavoritesInner {
    fn apply_toggle(&mut self, record: FavoriteRecord) -> ToggleOutcome {
        let id = record.id();
        if let Some(pos) = self.favorites.iter().position(|fav| fav.id() == id) {
            self.favorites.remove(pos);
            ToggleOutcome::Removed
        } else {
            self.favorites.push(record);
            ToggleOutcome::Added
        }
    }
}

/// Shared handle to the favorites collection. Cloning is cheap and every
/// clone sees the same state.
#[derive(Clone)]
pub struct FavoritesStore {
    inner: Arc<RwLock<FavoritesInner>>,
    storage: Arc<dyn KeyValueStore>,
    // Serializes snapshot writes so an older snapshot never lands last.
    write_gate: Arc<Mutex<()>>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(FavoritesInner {
                state: LoadState::Uninitialized,
                favorites: Vec::new(),
                pending: Vec::new(),
            })),
            storage,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    pub async fn load_state(&self) -> LoadState {
        self.inner.read().await.state
    }

    /// Reads the durable slot and moves the store to `Ready`.
    ///
    /// A missing slot yields an empty collection. Read and decode failures are
    /// logged and also yield an empty collection. Calling this on a store that
    /// is already loading or ready does nothing.
    pub async fn load(&self) {
        {
            let mut inner = self.inner.write().await;
            if inner.state != LoadState::Uninitialized {
                return;
            }
            inner.state = LoadState::Loading;
        }

        let loaded = match self.read_slot().await {
            Ok(favorites) => favorites,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load favorites, starting empty");
                Vec::new()
            }
        };

        let replayed = {
            let mut inner = self.inner.write().await;
            inner.favorites = dedup_by_id(loaded);
            let pending = std::mem::take(&mut inner.pending);
            let replayed = pending.len();
            for record in pending {
                let outcome = inner.apply_toggle(record);
                tracing::debug!(?outcome, "Replayed queued favorite toggle");
            }
            inner.state = LoadState::Ready;
            tracing::info!(
                count = inner.favorites.len(),
                replayed,
                "Favorites loaded"
            );
            replayed
        };

        if replayed > 0 {
            self.persist().await;
        }
    }

    async fn read_slot(&self) -> Result<Vec<FavoriteRecord>, PersistenceError> {
        match self.storage.get(FAVORITES_KEY).await? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| PersistenceError::Corrupt {
                key: FAVORITES_KEY.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Adds the movie if it is not a favorite yet, removes it otherwise.
    pub async fn toggle_favorite(&self, record: FavoriteRecord) -> ToggleOutcome {
        let movie_id = record.id();
        let outcome = {
            let mut inner = self.inner.write().await;
            if inner.state == LoadState::Ready {
                inner.apply_toggle(record)
            } else {
                inner.pending.push(record);
                ToggleOutcome::Queued
            }
        };

        tracing::info!(movie_id, ?outcome, "Toggled favorite");

        if outcome != ToggleOutcome::Queued {
            self.persist().await;
        }
        outcome
    }

    /// Always `false` until the store is ready.
    pub async fn is_favorite(&self, movie_id: u64) -> bool {
        let inner = self.inner.read().await;
        inner.state == LoadState::Ready && inner.favorites.iter().any(|fav| fav.id() == movie_id)
    }

    /// What `is_favorite` will report once queued toggles are applied: the
    /// loaded collection, flipped once per pending toggle of `movie_id`.
    pub async fn projected_favorite(&self, movie_id: u64) -> bool {
        let inner = self.inner.read().await;
        let stored = inner.favorites.iter().any(|fav| fav.id() == movie_id);
        let flips = inner
            .pending
            .iter()
            .filter(|record| record.id() == movie_id)
            .count();
        stored ^ (flips % 2 == 1)
    }

    pub async fn list_favorites(&self) -> Vec<FavoriteRecord> {
        self.inner.read().await.favorites.clone()
    }

    /// Writes the current snapshot. Failures are logged; memory stays authoritative.
    async fn persist(&self) {
        let _gate = self.write_gate.lock().await;

        let snapshot = {
            let inner = self.inner.read().await;
            serde_json::to_string(&inner.favorites)
        };

        let result = match snapshot {
            Ok(json) => self.storage.set(FAVORITES_KEY, &json).await,
            Err(e) => Err(e.into()),
        };

        if let Err(e) = result {
            tracing::error!(error = %e, "Failed to save favorites");
        }
    }
}

fn dedup_by_id(records: Vec<FavoriteRecord>) -> Vec<FavoriteRecord> {
    let mut seen = std::collections::HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.id()))
        .collect()
}
