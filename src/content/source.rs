//! Content data sources.
//!
//! The dashboard only ever talks to [`ContentSource`]; the bundled
//! [`MockContentSource`] synthesizes pages locally after a simulated delay.
use chrono::{Duration as ChronoDuration, Utc};
use futures::future::BoxFuture;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

use super::types::{ContentItem, ContentType, FALLBACK_CATEGORY};

/// Default number of items produced per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default simulated network delay.
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(1000);

/// Maximum age of generated items (seven days).
const MAX_ITEM_AGE_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch content")]
    Unavailable,

    #[error("Failed to fetch content: {0}")]
    Backend(String),
}

/// Capability to fetch one page of content for a set of category filters.
///
/// Returns a boxed future so the source can be held as `Arc<dyn ContentSource>`
/// and swapped for a real backend without touching the UI.
pub trait ContentSource: Send + Sync {
    fn fetch_page<'a>(
        &'a self,
        page: u32,
        categories: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<ContentItem>, FetchError>>;
}

// ============================================================================
// Mock Source
// ============================================================================

/// Synthetic, never-ending feed.
#[derive(Debug, Clone)]
pub struct MockContentSource {
    delay: Duration,
    page_size: usize,
}

impl MockContentSource {
    pub fn new(delay: Duration, page_size: usize) -> Self {
        Self { delay, page_size }
    }
}

impl Default for MockContentSource {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_DELAY, DEFAULT_PAGE_SIZE)
    }
}

impl ContentSource for MockContentSource {
    fn fetch_page<'a>(
        &'a self,
        page: u32,
        categories: &'a [String],
    ) -> BoxFuture<'a, Result<Vec<ContentItem>, FetchError>> {
        Box::pin(async move {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            // ThreadRng is !Send; keep it out of any await point
            let items = {
                let mut rng = rand::thread_rng();
                generate_batch(page, categories, self.page_size, &mut rng)
            };
            tracing::debug!(page, count = items.len(), "Generated mock content page");
            Ok(items)
        })
    }
}

/// Generate one page of synthetic items.
///
/// Item `i` of page `p` gets id `"{type}-{p}-{i}"` and sequence number
/// `p * page_size + i` in its title. Categories are drawn from `categories`,
/// or [`FALLBACK_CATEGORY`] when none are selected.
pub fn generate_batch<R: Rng>(
    page: u32,
    categories: &[String],
    page_size: usize,
    rng: &mut R,
) -> Vec<ContentItem> {
    let now = Utc::now();

    (0..page_size)
        .map(|i| {
            let kind = *ContentType::ALL
                .choose(rng)
                .unwrap_or(&ContentType::News);
            let category = categories
                .choose(rng)
                .map(String::as_str)
                .unwrap_or(FALLBACK_CATEGORY);
            let sequence = page as usize * page_size + i;
            let age = rng.gen_range(0..MAX_ITEM_AGE_SECS);

            let id = format!("{}-{}-{}", kind, page, i);
            ContentItem {
                url: Some(format!("https://example.com/{}/{}", category, id)),
                id,
                kind,
                title: format!("{}: {} #{}", capitalize(category), headline(kind), sequence),
                description: format!(
                    "This is a {} item about {}. Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore.",
                    kind, category
                ),
                image: format!("https://picsum.photos/seed/{}-{}/400/250", page, i),
                category: category.to_string(),
                date: now - ChronoDuration::seconds(age),
                source: source_name(kind).to_string(),
            }
        })
        .collect()
}

fn headline(kind: ContentType) -> &'static str {
    match kind {
        ContentType::News => "Breaking News",
        ContentType::Movie => "Popular Movie",
        ContentType::Social => "Trending Post",
    }
}

fn source_name(kind: ContentType) -> &'static str {
    match kind {
        ContentType::News => "News Network",
        ContentType::Movie => "TMDB",
        ContentType::Social => "Social Media",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cats(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_batch_has_page_size_items() {
        let mut rng = StdRng::seed_from_u64(7);
        let items = generate_batch(1, &cats(&["sports"]), 10, &mut rng);
        assert_eq!(items.len(), 10);
    }

    #[test]
    fn test_ids_encode_type_page_and_index() {
        let mut rng = StdRng::seed_from_u64(7);
        let items = generate_batch(3, &cats(&["sports"]), 4, &mut rng);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.id, format!("{}-3-{}", item.kind, i));
        }
    }

    #[test]
    fn test_titles_carry_sequence_numbers() {
        let mut rng = StdRng::seed_from_u64(1);
        let items = generate_batch(2, &cats(&["science"]), 10, &mut rng);
        assert!(items[0].title.starts_with("Science: "));
        assert!(items[0].title.ends_with("#20"));
        assert!(items[9].title.ends_with("#29"));
    }

    #[test]
    fn test_categories_drawn_from_filter() {
        let mut rng = StdRng::seed_from_u64(42);
        let filter = cats(&["health", "business"]);
        let items = generate_batch(1, &filter, 50, &mut rng);
        assert!(items.iter().all(|i| filter.contains(&i.category)));
    }

    #[test]
    fn test_empty_filter_falls_back() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = generate_batch(1, &[], 5, &mut rng);
        assert!(items.iter().all(|i| i.category == FALLBACK_CATEGORY));
    }

    #[test]
    fn test_source_matches_type() {
        let mut rng = StdRng::seed_from_u64(9);
        for item in generate_batch(1, &cats(&["sports"]), 30, &mut rng) {
            assert_eq!(item.source, source_name(item.kind));
        }
    }

    #[test]
    fn test_dates_within_last_week() {
        let mut rng = StdRng::seed_from_u64(5);
        let items = generate_batch(1, &cats(&["sports"]), 30, &mut rng);
        let now = Utc::now();
        for item in items {
            assert!(item.date <= now);
            assert!(now - item.date <= ChronoDuration::seconds(MAX_ITEM_AGE_SECS + 5));
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("technology"), "Technology");
        assert_eq!(capitalize(""), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_source_waits_for_delay() {
        let source = MockContentSource::new(Duration::from_millis(1000), 10);
        let filter = cats(&["sports"]);
        let started = tokio::time::Instant::now();
        let items = source.fetch_page(1, &filter).await.unwrap();
        assert_eq!(items.len(), 10);
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(FetchError::Unavailable.to_string(), "Failed to fetch content");
        assert_eq!(
            FetchError::Backend("boom".into()).to_string(),
            "Failed to fetch content: boom"
        );
    }
}
