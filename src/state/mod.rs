//! The three independently owned state containers.
//!
//! - [`ContentStore`] - fetched items, loading/error flags, pagination cursor
//! - [`PreferencesStore`] - categories, dark mode, language (persisted)
//! - [`FavoritesStore`] - user-curated items, newest first (persisted)
//!
//! Persisted stores write a JSON snapshot of their whole state through the
//! [`KeyValueStore`] port after every mutation.

mod content;
mod favorites;
mod preferences;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::{KeyValueStore, StorageError};

pub use content::{ContentState, ContentStore, FetchOutcome, FetchTicket};
pub use favorites::{FavoritesState, FavoritesStore, FAVORITES_KEY};
pub use preferences::{PreferencesState, PreferencesStore, PREFERENCES_KEY, SUPPORTED_LANGUAGES};

/// Read and decode the snapshot stored under `key`, if any.
async fn load_snapshot<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Encode and write a snapshot under `key`.
async fn save_snapshot<T: Serialize>(
    storage: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &raw).await
}

/// Delete every persisted snapshot (`--reset`).
pub async fn clear_persisted(storage: &dyn KeyValueStore) -> Result<(), StorageError> {
    storage.remove(PREFERENCES_KEY).await?;
    storage.remove(FAVORITES_KEY).await?;
    tracing::info!("Cleared stored preferences and favorites");
    Ok(())
}
