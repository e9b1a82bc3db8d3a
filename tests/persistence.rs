//! Integration tests for preference and favorite persistence through the
//! SQLite key-value store.
//!
//! Each test opens its own in-memory database. Reloading a store from the
//! same database stands in for an application restart.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use contenthub::content::{ContentItem, ContentType};
use contenthub::state::{
    clear_persisted, FavoritesStore, PreferencesState, PreferencesStore, FAVORITES_KEY,
    PREFERENCES_KEY,
};
use contenthub::storage::{Database, KeyValueStore, StorageError};
use pretty_assertions::assert_eq;

async fn test_db() -> Arc<Database> {
    Arc::new(Database::open(":memory:").await.unwrap())
}

fn item(id: &str) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        kind: ContentType::Social,
        title: format!("Post {id}"),
        description: "A post".to_string(),
        image: String::new(),
        category: "sports".to_string(),
        date: Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
        source: "Social Media".to_string(),
        url: Some(format!("https://example.com/{id}")),
    }
}

// ============================================================================
// Preferences
// ============================================================================

#[tokio::test]
async fn test_preferences_survive_reload() {
    let db = test_db().await;
    {
        let mut prefs = PreferencesStore::load(db.clone(), PreferencesState::default())
            .await
            .unwrap();
        prefs.toggle_category("science").await;
        prefs.toggle_dark_mode().await;
        prefs.set_language("fr").await;
    }

    let prefs = PreferencesStore::load(db, PreferencesState::default())
        .await
        .unwrap();
    assert_eq!(
        prefs.categories(),
        ["technology", "sports", "entertainment", "science"]
    );
    assert!(prefs.dark_mode());
    assert_eq!(prefs.language(), "fr");
}

#[tokio::test]
async fn test_stored_preferences_override_defaults() {
    let db = test_db().await;
    {
        let mut prefs = PreferencesStore::load(db.clone(), PreferencesState::default())
            .await
            .unwrap();
        prefs.set_categories(vec!["health".to_string()]).await;
    }

    let other_defaults = PreferencesState {
        categories: vec!["business".to_string()],
        dark_mode: true,
        language: "de".to_string(),
    };
    let prefs = PreferencesStore::load(db, other_defaults).await.unwrap();
    assert_eq!(prefs.categories(), ["health"]);
    assert!(!prefs.dark_mode());
}

#[tokio::test]
async fn test_preferences_snapshot_is_camel_case_json() {
    let db = test_db().await;
    let mut prefs = PreferencesStore::load(db.clone(), PreferencesState::default())
        .await
        .unwrap();
    prefs.toggle_dark_mode().await;

    let raw = db.get(PREFERENCES_KEY).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["darkMode"], serde_json::Value::Bool(true));
    assert_eq!(json["language"], "en");
}

// ============================================================================
// Favorites
// ============================================================================

#[tokio::test]
async fn test_favorites_survive_reload_in_order() {
    let db = test_db().await;
    {
        let mut favorites = FavoritesStore::load(db.clone()).await.unwrap();
        favorites.toggle(&item("a")).await;
        favorites.toggle(&item("b")).await;
        favorites.toggle(&item("c")).await;
        favorites.toggle(&item("a")).await;
    }

    let favorites = FavoritesStore::load(db).await.unwrap();
    let ids: Vec<&str> = favorites.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "b"]);
    assert_eq!(favorites.items()[0], item("c"));
}

#[tokio::test]
async fn test_corrupt_favorites_fail_loudly() {
    let db = test_db().await;
    db.set(FAVORITES_KEY, "{not json").await.unwrap();

    match FavoritesStore::load(db).await {
        Err(StorageError::Corrupt { key, .. }) => assert_eq!(key, FAVORITES_KEY),
        other => panic!("expected Corrupt, got {:?}", other.map(|f| f.len())),
    }
}

#[tokio::test]
async fn test_clear_persisted_resets_both_stores() {
    let db = test_db().await;
    db.set(FAVORITES_KEY, "{not json").await.unwrap();
    db.set(PREFERENCES_KEY, r#"{"categories":["health"],"darkMode":true,"language":"es"}"#)
        .await
        .unwrap();

    clear_persisted(db.as_ref()).await.unwrap();

    let favorites = FavoritesStore::load(db.clone()).await.unwrap();
    assert!(favorites.is_empty());
    let prefs = PreferencesStore::load(db, PreferencesState::default())
        .await
        .unwrap();
    assert_eq!(prefs.state(), &PreferencesState::default());
}
