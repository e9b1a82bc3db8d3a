//! Feed view operations over already-fetched items.
//!
//! - [`filter`] - case-insensitive search and per-section type narrowing
//! - [`reorder`] - move one item to a new slot (the drag gesture)
//!
//! Both are pure: they take the current items and return a new view or
//! ordering without touching any store.

mod filter;
mod reorder;

pub use filter::{filter_items, narrow_to_type};
pub use reorder::{move_by_id, move_item, ReorderError};
