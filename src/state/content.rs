use crate::content::{ContentItem, FetchError};
use crate::feed::{move_by_id, move_item, ReorderError};

/// Snapshot of the fetched feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentState {
    /// Items in display order (fetch order, or the user's reordering).
    pub items: Vec<ContentItem>,
    pub loading: bool,
    pub error: Option<String>,
    /// False once a fetch returns an empty batch.
    pub has_more: bool,
    /// Last page successfully applied.
    pub page: u32,
}

impl Default for ContentState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            has_more: true,
            page: 1,
        }
    }
}

/// Receipt for an in-flight fetch.
///
/// Carries the page requested and the store generation at the time the
/// fetch began. Completions for anything but the latest ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub page: u32,
    generation: u64,
}

/// What `complete_fetch` did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Items replaced (page 1) or appended (page > 1).
    Applied { received: usize },
    /// Error message stored, loading cleared.
    Failed,
    /// A newer fetch or a reset superseded this one; nothing changed.
    Stale,
}

/// Owner of the feed contents and pagination cursor.
#[derive(Debug, Default)]
pub struct ContentStore {
    state: ContentState,
    generation: u64,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ContentState {
        &self.state
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.state.items
    }

    /// A further page may be requested: nothing in flight and the feed has
    /// not reported exhaustion.
    pub fn can_load_more(&self) -> bool {
        !self.state.loading && self.state.has_more
    }

    /// Mark a fetch for `page` as started and hand out its ticket.
    ///
    /// Any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self, page: u32) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.state.loading = true;
        self.state.error = None;
        FetchTicket {
            page,
            generation: self.generation,
        }
    }

    /// Start fetching the page after the current one, if allowed.
    pub fn begin_next_page(&mut self) -> Option<FetchTicket> {
        if !self.can_load_more() {
            return None;
        }
        let next = self.state.page.saturating_add(1);
        Some(self.begin_fetch(next))
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply the result of the fetch identified by `ticket`.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<ContentItem>, FetchError>,
    ) -> FetchOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(
                page = ticket.page,
                generation = ticket.generation,
                current = self.generation,
                "Discarding stale fetch result"
            );
            return FetchOutcome::Stale;
        }

        self.state.loading = false;
        match result {
            Ok(batch) => {
                let received = batch.len();
                self.state.has_more = !batch.is_empty();
                if ticket.page == 1 {
                    self.state.items = batch;
                } else {
                    self.state.items.extend(batch);
                }
                self.state.page = ticket.page;
                FetchOutcome::Applied { received }
            }
            Err(e) => {
                tracing::warn!(page = ticket.page, error = %e, "Content fetch failed");
                self.state.error = Some(e.to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Empty the feed and rewind pagination. In-flight fetches become stale.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.state.items.clear();
        self.state.page = 1;
        self.state.has_more = true;
        self.state.loading = false;
    }

    /// Replace the stored sequence verbatim with a new ordering.
    pub fn replace_order(&mut self, items: Vec<ContentItem>) {
        self.state.items = items;
    }

    /// Move the item at `from` to `to`.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), ReorderError> {
        let reordered = move_item(&self.state.items, from, to)?;
        self.replace_order(reordered);
        Ok(())
    }

    /// Move the item `active_id` to the slot held by `over_id`.
    pub fn reorder(&mut self, active_id: &str, over_id: &str) -> Result<(), ReorderError> {
        if active_id == over_id {
            return Ok(());
        }
        let reordered = move_by_id(&self.state.items, active_id, over_id)?;
        self.replace_order(reordered);
        Ok(())
    }
}
