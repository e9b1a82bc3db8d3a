//! Helper functions for UI operations.
//!
//! Fetch spawning, feed resets and link opening shared by the input and
//! event handlers.

use crate::app::{App, AppEvent};
use crate::content::ContentSource;
use crate::state::FetchTicket;
use crate::util::validate_url_for_open;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Status shown when the selected card carries no link.
pub(super) const ERR_ITEM_NO_URL: &str = "Item has no link";

/// Wraps a future to catch panics and convert them to errors.
///
/// Panics in spawned tasks are otherwise swallowed by the runtime. Here they
/// become `Err(String)` with the panic message so the UI can report them.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Reset the feed and request page 1 for the current categories.
pub(super) fn refresh_feed(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    app.content.reset();
    app.selected_card = 0;
    let ticket = app.content.begin_fetch(1);
    tracing::info!(categories = ?app.preferences.categories(), "Refreshing feed");
    spawn_fetch(app, ticket, event_tx);
}

/// Request the next page when the selection nears the end of the list.
///
/// No-op while a fetch is in flight, after an empty page, or outside feed
/// sections. A failed page is requested again. Returns true if a fetch was
/// started.
pub(super) fn load_more_if_needed(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) -> bool {
    if !app.near_end() {
        return false;
    }
    match app.content.begin_next_page() {
        Some(ticket) => {
            tracing::debug!(page = ticket.page, "Loading next page");
            spawn_fetch(app, ticket, event_tx);
            true
        }
        None => false,
    }
}

/// Spawn the fetch for `ticket`, replacing any task still in flight.
pub(super) fn spawn_fetch(app: &mut App, ticket: FetchTicket, event_tx: &mpsc::Sender<AppEvent>) {
    app.abort_fetch();
    app.fetch_handle = Some(spawn_fetch_task(
        app.source.clone(),
        ticket,
        app.preferences.categories().to_vec(),
        event_tx.clone(),
    ));
}

/// Run one page fetch in the background and report it as
/// `AppEvent::ContentFetched`. A panic is reported as `TaskPanicked`
/// carrying the ticket.
pub(super) fn spawn_fetch_task(
    source: Arc<dyn ContentSource>,
    ticket: FetchTicket,
    categories: Vec<String>,
    tx: mpsc::Sender<AppEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let tx_panic = tx.clone();
        match catch_task_panic(async {
            let result = source.fetch_page(ticket.page, &categories).await;
            if let Err(e) = tx.send(AppEvent::ContentFetched { ticket, result }).await {
                tracing::warn!(error = %e, event = "ContentFetched", "Channel send failed (receiver dropped)");
            }
        })
        .await
        {
            Ok(()) => {}
            Err(panic_msg) => {
                tracing::error!(task = "fetch", page = ticket.page, error = %panic_msg, "Background task panicked");
                let _ = tx_panic
                    .send(AppEvent::TaskPanicked {
                        task: "fetch",
                        ticket: Some(ticket),
                        error: panic_msg,
                    })
                    .await;
            }
        }
    })
}

/// Open the selected card's link in the system browser.
pub(super) fn open_selected_link(app: &mut App) {
    let Some(item) = app.selected_item() else {
        return;
    };
    let Some(url) = item.url.clone() else {
        app.set_status(ERR_ITEM_NO_URL);
        return;
    };

    if let Err(e) = validate_url_for_open(&url) {
        tracing::warn!(url = %url, error = %e, "Refused to open link");
        app.set_status(format!("Cannot open link: {}", e));
        return;
    }

    match open::that(&url) {
        Ok(()) => app.set_status("Opened in browser"),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Failed to open browser");
            app.set_status(format!("Failed to open browser: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentItem, FetchError};
    use futures::future::BoxFuture;

    struct PanickingSource;

    impl ContentSource for PanickingSource {
        fn fetch_page<'a>(
            &'a self,
            _page: u32,
            _categories: &'a [String],
        ) -> BoxFuture<'a, Result<Vec<ContentItem>, FetchError>> {
            Box::pin(async { panic!("source exploded") })
        }
    }

    #[tokio::test]
    async fn test_catch_task_panic_ok() {
        assert_eq!(catch_task_panic(async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn test_catch_task_panic_message() {
        let result = catch_task_panic(async { panic!("boom {}", 1) }).await;
        assert_eq!(result, Err::<(), _>("boom 1".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_task_panic_reports_ticket() {
        let mut store = crate::state::ContentStore::new();
        let ticket = store.begin_fetch(1);
        let (tx, mut rx) = mpsc::channel(4);

        spawn_fetch_task(Arc::new(PanickingSource), ticket, Vec::new(), tx)
            .await
            .unwrap();

        match rx.recv().await {
            Some(AppEvent::TaskPanicked {
                task,
                ticket: Some(t),
                error,
            }) => {
                assert_eq!(task, "fetch");
                assert_eq!(t, ticket);
                assert_eq!(error, "source exploded");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scrolling_after_failed_page_requests_it_again() {
        let mut app = crate::app::test_app().await;
        let (tx, _rx) = mpsc::channel(4);

        let first = app.content.begin_fetch(1);
        let items = app.source.fetch_page(1, &[]).await.unwrap();
        app.content.complete_fetch(first, Ok(items));
        let second = app.content.begin_next_page().unwrap();
        app.content.complete_fetch(second, Err(FetchError::Unavailable));
        assert!(app.content.state().error.is_some());

        app.focus = crate::app::Focus::Cards;
        app.selected_card = app.content.items().len() - 2;
        app.nav_down();

        assert!(load_more_if_needed(&mut app, &tx));
        assert!(app.content.state().loading);
        assert_eq!(app.content.state().error, None);
        assert_eq!(app.content.items().len(), 10);
        assert!(app.fetch_handle.is_some());
    }

    #[tokio::test]
    async fn test_no_load_more_away_from_end() {
        let mut app = crate::app::test_app().await;
        let (tx, _rx) = mpsc::channel(4);
        let first = app.content.begin_fetch(1);
        let items = app.source.fetch_page(1, &[]).await.unwrap();
        app.content.complete_fetch(first, Ok(items));
        app.selected_card = 0;

        assert!(!load_more_if_needed(&mut app, &tx));
        assert!(!app.content.state().loading);
    }
}
