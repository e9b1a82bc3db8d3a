use thiserror::Error;

use crate::content::ContentItem;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReorderError {
    #[error("Position {index} is out of bounds for {len} items")]
    OutOfBounds { index: usize, len: usize },

    #[error("Item '{0}' is not in the list")]
    UnknownItem(String),
}

/// Remove the element at `from` and reinsert it at `to`.
///
/// Returns the complete new ordering; the input is left untouched. Both
/// positions must be in bounds. `move_item(&[A, B, C], 0, 2)` yields
/// `[B, C, A]`.
pub fn move_item<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>, ReorderError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(ReorderError::OutOfBounds { index, len });
        }
    }

    let mut reordered = items.to_vec();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);
    Ok(reordered)
}

/// Drag-gesture form of [`move_item`]: move the item with `active_id` to the
/// slot currently held by `over_id`.
///
/// Positions are resolved against `items` itself, so callers that display a
/// filtered view still reorder the full list without dropping hidden items.
pub fn move_by_id(
    items: &[ContentItem],
    active_id: &str,
    over_id: &str,
) -> Result<Vec<ContentItem>, ReorderError> {
    let position = |id: &str| {
        items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| ReorderError::UnknownItem(id.to_string()))
    };
    let from = position(active_id)?;
    let to = position(over_id)?;
    move_item(items, from, to)
}
