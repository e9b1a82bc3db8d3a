use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{load_snapshot, save_snapshot};
use crate::storage::{KeyValueStore, StorageError};

/// Storage key for the preferences snapshot.
pub const PREFERENCES_KEY: &str = "userPreferences";

/// Languages offered by the preferences overlay, in cycle order.
pub const SUPPORTED_LANGUAGES: [&str; 4] = ["en", "es", "fr", "de"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesState {
    /// Selected categories. Set semantics, kept in insertion order.
    pub categories: Vec<String>,
    pub dark_mode: bool,
    pub language: String,
}

impl Default for PreferencesState {
    fn default() -> Self {
        Self {
            categories: vec![
                "technology".to_string(),
                "sports".to_string(),
                "entertainment".to_string(),
            ],
            dark_mode: false,
            language: "en".to_string(),
        }
    }
}

// ============================================================================
// PreferencesStore
// ============================================================================

/// Preferences with write-through persistence.
///
/// Every mutation updates memory first, then writes the whole snapshot. A
/// failed write is logged and the in-memory change stands.
pub struct PreferencesStore {
    state: PreferencesState,
    storage: Arc<dyn KeyValueStore>,
}

impl PreferencesStore {
    /// Load the stored snapshot, or start from `defaults` when none exists.
    ///
    /// A snapshot that fails to decode is an error, not a silent fallback.
    pub async fn load(
        storage: Arc<dyn KeyValueStore>,
        defaults: PreferencesState,
    ) -> Result<Self, StorageError> {
        let state = match load_snapshot(storage.as_ref(), PREFERENCES_KEY).await? {
            Some(stored) => {
                tracing::debug!("Loaded stored preferences");
                stored
            }
            None => defaults,
        };
        Ok(Self { state, storage })
    }

    pub fn state(&self) -> &PreferencesState {
        &self.state
    }

    pub fn categories(&self) -> &[String] {
        &self.state.categories
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.state.categories.iter().any(|c| c == category)
    }

    pub fn dark_mode(&self) -> bool {
        self.state.dark_mode
    }

    pub fn language(&self) -> &str {
        &self.state.language
    }

    /// Add `category` if absent, remove it if present.
    ///
    /// Returns whether the category is selected afterwards.
    pub async fn toggle_category(&mut self, category: &str) -> bool {
        let selected = if let Some(pos) = self.state.categories.iter().position(|c| c == category)
        {
            self.state.categories.remove(pos);
            false
        } else {
            self.state.categories.push(category.to_string());
            true
        };
        self.persist().await;
        selected
    }

    /// Replace the selection wholesale. Duplicates are dropped, first
    /// occurrence wins.
    pub async fn set_categories(&mut self, categories: Vec<String>) {
        let mut deduped: Vec<String> = Vec::with_capacity(categories.len());
        for category in categories {
            if !deduped.contains(&category) {
                deduped.push(category);
            }
        }
        self.state.categories = deduped;
        self.persist().await;
    }

    pub async fn toggle_dark_mode(&mut self) -> bool {
        self.state.dark_mode = !self.state.dark_mode;
        self.persist().await;
        self.state.dark_mode
    }

    pub async fn set_language(&mut self, language: &str) {
        self.state.language = language.to_string();
        self.persist().await;
    }

    /// Advance to the next entry of [`SUPPORTED_LANGUAGES`]. An unknown
    /// current language restarts the cycle.
    pub async fn cycle_language(&mut self) -> &str {
        let next = SUPPORTED_LANGUAGES
            .iter()
            .position(|l| *l == self.state.language)
            .map(|i| SUPPORTED_LANGUAGES[(i + 1) % SUPPORTED_LANGUAGES.len()])
            .unwrap_or(SUPPORTED_LANGUAGES[0]);
        self.set_language(next).await;
        &self.state.language
    }

    async fn persist(&self) {
        if let Err(e) = save_snapshot(self.storage.as_ref(), PREFERENCES_KEY, &self.state).await {
            tracing::warn!(error = %e, "Failed to persist preferences");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
