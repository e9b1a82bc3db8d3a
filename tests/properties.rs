//! Property tests for the feed view operations and store toggles.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use contenthub::content::{ContentItem, ContentType, AVAILABLE_CATEGORIES};
use contenthub::feed::{filter_items, move_by_id, move_item};
use contenthub::state::{FavoritesStore, PreferencesState, PreferencesStore};
use contenthub::storage::MemoryStore;
use proptest::prelude::*;

fn item(id: usize, title: &str) -> ContentItem {
    ContentItem {
        id: format!("item-{id}"),
        kind: ContentType::ALL[id % 3],
        title: title.to_string(),
        description: String::new(),
        image: String::new(),
        category: AVAILABLE_CATEGORIES[id % AVAILABLE_CATEGORIES.len()].to_string(),
        date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        source: "test".to_string(),
        url: None,
    }
}

fn items_strategy() -> impl Strategy<Value = Vec<ContentItem>> {
    prop::collection::vec("[a-zA-Z ]{0,12}", 1..20).prop_map(|titles| {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| item(i, t))
            .collect()
    })
}

fn ids(items: &[ContentItem]) -> Vec<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn move_item_preserves_multiset(
        values in prop::collection::vec(any::<u8>(), 1..30),
        from_seed in any::<usize>(),
        to_seed in any::<usize>(),
    ) {
        let from = from_seed % values.len();
        let to = to_seed % values.len();
        let moved = move_item(&values, from, to).unwrap();

        prop_assert_eq!(moved.len(), values.len());
        prop_assert_eq!(moved[to], values[from]);
        let mut a = values.clone();
        let mut b = moved.clone();
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn move_there_and_back_restores_order(
        values in prop::collection::vec(any::<u16>(), 1..30),
        from_seed in any::<usize>(),
        to_seed in any::<usize>(),
    ) {
        let from = from_seed % values.len();
        let to = to_seed % values.len();
        let moved = move_item(&values, from, to).unwrap();
        let restored = move_item(&moved, to, from).unwrap();
        prop_assert_eq!(restored, values);
    }

    #[test]
    fn move_out_of_bounds_is_rejected(
        values in prop::collection::vec(any::<u8>(), 0..10),
        extra in 0usize..5,
    ) {
        prop_assert!(move_item(&values, values.len() + extra, 0).is_err());
    }

    #[test]
    fn move_by_id_keeps_every_item(
        items in items_strategy(),
        a in any::<usize>(),
        b in any::<usize>(),
    ) {
        let active = items[a % items.len()].id.clone();
        let over = items[b % items.len()].id.clone();
        let moved = move_by_id(&items, &active, &over).unwrap();

        let mut before = ids(&items);
        let mut after = ids(&moved);
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn empty_query_is_identity(items in items_strategy()) {
        let filtered: Vec<ContentItem> = filter_items(&items, "").into_iter().cloned().collect();
        prop_assert_eq!(ids(&filtered), ids(&items));
    }

    #[test]
    fn filter_keeps_relative_order(items in items_strategy(), query in "[a-z]{1,2}") {
        let filtered = filter_items(&items, &query);
        let positions: Vec<usize> = filtered
            .iter()
            .map(|f| items.iter().position(|i| i.id == f.id).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        for f in filtered {
            let haystack = format!("{} {} {}", f.title, f.description, f.category).to_lowercase();
            prop_assert!(haystack.contains(&query));
        }
    }

    #[test]
    fn favorite_toggle_twice_restores(
        seed in prop::collection::vec(0usize..8, 0..8),
        target in 0usize..8,
    ) {
        // Re-adding a present item moves it to the front; covered below.
        prop_assume!(!seed.contains(&target));
        runtime().block_on(async {
            let mut favorites = FavoritesStore::load(Arc::new(MemoryStore::new())).await.unwrap();
            for i in seed {
                if !favorites.is_favorite(&format!("item-{i}")) {
                    favorites.toggle(&item(i, "seed")).await;
                }
            }
            let before = ids(favorites.items());

            favorites.toggle(&item(target, "target")).await;
            favorites.toggle(&item(target, "target")).await;

            prop_assert_eq!(ids(favorites.items()), before);
            Ok(())
        })?;
    }

    #[test]
    fn favorite_toggle_twice_moves_present_item_to_front(
        seed in prop::collection::vec(0usize..8, 1..8),
        pick in any::<usize>(),
    ) {
        let target = seed[pick % seed.len()];
        runtime().block_on(async {
            let mut favorites = FavoritesStore::load(Arc::new(MemoryStore::new())).await.unwrap();
            for i in &seed {
                if !favorites.is_favorite(&format!("item-{i}")) {
                    favorites.toggle(&item(*i, "seed")).await;
                }
            }
            let mut before = ids(favorites.items());

            prop_assert!(!favorites.toggle(&item(target, "target")).await);
            prop_assert!(favorites.toggle(&item(target, "target")).await);

            let mut after = ids(favorites.items());
            prop_assert_eq!(&after[0], &format!("item-{target}"));
            before.sort();
            after.sort();
            prop_assert_eq!(after, before);
            Ok(())
        })?;
    }

    #[test]
    fn category_toggle_twice_restores(category in prop::sample::select(AVAILABLE_CATEGORIES.to_vec())) {
        runtime().block_on(async {
            let mut prefs = PreferencesStore::load(
                Arc::new(MemoryStore::new()),
                PreferencesState::default(),
            )
            .await
            .unwrap();
            let mut before = prefs.categories().to_vec();

            prefs.toggle_category(category).await;
            prefs.toggle_category(category).await;

            // Re-adding appends, so compare as sets.
            let mut after = prefs.categories().to_vec();
            before.sort();
            after.sort();
            prop_assert_eq!(after, before);
            Ok(())
        })?;
    }
}
