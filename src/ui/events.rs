//! Application event handling.
//!
//! Applies background fetch results to the content store.

use crate::app::{App, AppEvent};
use crate::content::{ContentItem, FetchError};
use crate::state::{FetchOutcome, FetchTicket};
use crate::util::strip_control_chars;
use tokio::sync::mpsc;

use super::helpers::load_more_if_needed;

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent, event_tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::ContentFetched { ticket, result } => {
            handle_content_fetched(app, ticket, result, event_tx);
        }
        AppEvent::TaskPanicked {
            task,
            ticket,
            error,
        } => {
            tracing::error!(task, error, "Background task panicked");
            if let Some(ticket) = ticket {
                app.content
                    .complete_fetch(ticket, Err(FetchError::Backend(error)));
            }
            app.set_status(format!("Internal error in {} task", task));
        }
    }
}

fn handle_content_fetched(
    app: &mut App,
    ticket: FetchTicket,
    result: Result<Vec<ContentItem>, FetchError>,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    let result = result.map(|items| items.into_iter().map(sanitize_item).collect());

    match app.content.complete_fetch(ticket, result) {
        FetchOutcome::Applied { received } => {
            tracing::debug!(page = ticket.page, received, "Page applied");
            app.fetch_handle = None;
            app.clamp_selection();
            // A type filter can leave too few cards to scroll. Keep paging
            // until there are enough, but not while a search is narrowing the
            // list, which could otherwise page forever.
            if received > 0 && app.search_query.is_empty() {
                load_more_if_needed(app, event_tx);
            }
        }
        FetchOutcome::Failed => {
            app.fetch_handle = None;
            if let Some(error) = app.content.state().error.clone() {
                app.set_status(error);
            }
        }
        FetchOutcome::Stale => {}
    }
}

/// Strip terminal control sequences from text fields before display.
fn sanitize_item(mut item: ContentItem) -> ContentItem {
    item.title = strip_control_chars(&item.title).into_owned();
    item.description = strip_control_chars(&item.description).into_owned();
    item.source = strip_control_chars(&item.source).into_owned();
    item.category = strip_control_chars(&item.category).into_owned();
    item
}
