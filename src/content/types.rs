use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Categories
// ============================================================================

/// Categories offered in the preferences panel.
pub const AVAILABLE_CATEGORIES: [&str; 6] = [
    "technology",
    "sports",
    "entertainment",
    "business",
    "science",
    "health",
];

/// Category used by the generator when no filter is selected.
pub const FALLBACK_CATEGORY: &str = "technology";

// ============================================================================
// Content Type
// ============================================================================

/// Kind of aggregated content. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    News,
    Movie,
    Social,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [ContentType::News, ContentType::Movie, ContentType::Social];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Movie => "movie",
            Self::Social => "social",
        }
    }

    /// Single-glyph badge shown on cards.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::News => "▤",
            Self::Movie => "▶",
            Self::Social => "✉",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Content Item
// ============================================================================

/// A single unit of aggregated material with its display metadata.
///
/// Items are never mutated after they are fetched; stores only replace or
/// reorder whole sequences of them. Two items are "the same" when their `id`
/// fields are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub title: String,
    pub description: String,
    /// Image reference (URL). Not rendered in the terminal.
    pub image: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ContentItem {
    /// Identity check shared by the content and favorites stores.
    pub fn same_item(&self, other: &ContentItem) -> bool {
        self.id == other.id
    }
}
