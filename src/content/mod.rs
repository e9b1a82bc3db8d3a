//! Content model and data sources.
//!
//! - [`types`] - `ContentItem`, `ContentType` and the category list
//! - [`source`] - the `ContentSource` port and the synthetic mock feed

mod source;
mod types;

pub use source::{
    generate_batch, ContentSource, FetchError, MockContentSource, DEFAULT_FETCH_DELAY,
    DEFAULT_PAGE_SIZE,
};
pub use types::{ContentItem, ContentType, AVAILABLE_CATEGORIES, FALLBACK_CATEGORY};
