use crate::content::{ContentItem, ContentType};

/// Case-insensitive substring match against title, description and category.
///
/// `needle` must already be lowercased.
fn matches(item: &ContentItem, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item.category.to_lowercase().contains(needle)
}

/// Items whose title, description or category contain `query`, ignoring case.
///
/// An empty query keeps every item. Order is preserved and nothing is
/// fetched: this is a view over already-loaded items.
pub fn filter_items<'a>(items: &'a [ContentItem], query: &str) -> Vec<&'a ContentItem> {
    if query.is_empty() {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items.iter().filter(|item| matches(item, &needle)).collect()
}

/// Narrow an already-filtered view to one content type. `None` keeps all.
pub fn narrow_to_type(items: Vec<&ContentItem>, kind: Option<ContentType>) -> Vec<&ContentItem> {
    match kind {
        None => items,
        Some(kind) => items.into_iter().filter(|item| item.kind == kind).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn item(id: &str, kind: ContentType, title: &str, description: &str, category: &str) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            description: description.to_string(),
            image: String::new(),
            category: category.to_string(),
            date: Utc::now(),
            source: "test".to_string(),
            url: None,
        }
    }

    fn ids(items: &[&ContentItem]) -> Vec<String> {
        items.iter().map(|i| i.id.clone()).collect()
    }

    fn sample() -> Vec<ContentItem> {
        vec![
            item("a", ContentType::News, "Rust 2.0 Released", "compiler news", "technology"),
            item("b", ContentType::Movie, "Space Opera", "a film about stars", "entertainment"),
            item("c", ContentType::Social, "Match day", "the derby", "Sports"),
        ]
    }

    #[test]
    fn test_empty_query_keeps_everything_in_order() {
        let items = sample();
        assert_eq!(ids(&filter_items(&items, "")), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_matches_title_case_insensitively() {
        let items = sample();
        assert_eq!(ids(&filter_items(&items, "rUsT")), vec!["a"]);
    }

    #[test]
    fn test_matches_description() {
        let items = sample();
        assert_eq!(ids(&filter_items(&items, "FILM")), vec!["b"]);
    }

    #[test]
    fn test_matches_category() {
        let items = sample();
        assert_eq!(ids(&filter_items(&items, "sports")), vec!["c"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let items = sample();
        assert!(filter_items(&items, "zzz").is_empty());
    }

    #[test]
    fn test_whitespace_is_part_of_query() {
        let items = sample();
        assert_eq!(ids(&filter_items(&items, "match day")), vec!["c"]);
        assert!(filter_items(&items, "  ").is_empty());
    }

    #[test]
    fn test_narrow_to_type() {
        let items = sample();
        let all = filter_items(&items, "");
        assert_eq!(ids(&narrow_to_type(all.clone(), None)), vec!["a", "b", "c"]);
        assert_eq!(ids(&narrow_to_type(all, Some(ContentType::Movie))), vec!["b"]);
    }
}
