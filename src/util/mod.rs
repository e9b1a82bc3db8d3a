//! Shared helpers for text layout and link handling.
//!
//! ```
//! use contenthub::util::{display_width, truncate_to_width};
//!
//! assert_eq!(display_width("Hello 世界"), 10);
//! assert_eq!(truncate_to_width("Breaking news today", 8), "Breakin…");
//! ```

mod link;
mod text;

pub use link::{validate_url_for_open, LinkError};
pub use text::{display_width, strip_control_chars, truncate_to_width};

/// Maximum accepted length of the search input, in characters.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;
