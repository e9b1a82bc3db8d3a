use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{load_snapshot, save_snapshot};
use crate::content::ContentItem;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key for the favorites snapshot.
pub const FAVORITES_KEY: &str = "favorites";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritesState {
    /// Newest first.
    pub items: Vec<ContentItem>,
}

/// Favorited items with write-through persistence.
pub struct FavoritesStore {
    state: FavoritesState,
    storage: Arc<dyn KeyValueStore>,
}

impl FavoritesStore {
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self, StorageError> {
        let state = load_snapshot(storage.as_ref(), FAVORITES_KEY)
            .await?
            .unwrap_or_default();
        Ok(Self { state, storage })
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.state.items
    }

    pub fn len(&self) -> usize {
        self.state.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.state.items.iter().any(|item| item.id == id)
    }

    /// Remove the item if it is a favorite, otherwise add it to the front.
    ///
    /// Identity is the item id. Returns whether the item is a favorite
    /// afterwards.
    pub async fn toggle(&mut self, item: &ContentItem) -> bool {
        let now_favorite = match self.state.items.iter().position(|f| f.same_item(item)) {
            Some(pos) => {
                self.state.items.remove(pos);
                false
            }
            None => {
                self.state.items.insert(0, item.clone());
                true
            }
        };
        tracing::debug!(id = %item.id, now_favorite, "Toggled favorite");
        self.persist().await;
        now_favorite
    }

    pub async fn clear(&mut self) {
        self.state.items.clear();
        self.persist().await;
    }

    async fn persist(&self) {
        if let Err(e) = save_snapshot(self.storage.as_ref(), FAVORITES_KEY, &self.state).await {
            tracing::warn!(error = %e, "Failed to persist favorites");
        }
    }
}
