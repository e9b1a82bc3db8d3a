//! The dashboard's event loop.
//!
//! One task owns the [`App`]. It waits on terminal input, finished fetches,
//! a shutdown signal and a 250ms tick, and redraws only when something
//! visible changed.

use crate::app::{App, AppEvent};
use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

use super::cards::SPINNER;
use super::events::handle_app_event;
use super::helpers::{load_more_if_needed, refresh_feed};
use super::input::handle_input;
use super::render::render;

const TICK: Duration = Duration::from_millis(250);

/// What the loop does after a key press.
pub enum Action {
    Continue,
    Quit,
}

/// Raw mode plus alternate screen, undone on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
        })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Resolves on SIGINT or SIGTERM (Ctrl-C elsewhere).
async fn shutdown_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::interrupt()),
            signal(SignalKind::terminate()),
        ) {
            (Ok(mut int), Ok(mut term)) => tokio::select! {
                _ = int.recv() => "SIGINT",
                _ = term.recv() => "SIGTERM",
            },
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "Signal handlers unavailable");
                std::future::pending().await
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        "Ctrl-C"
    }
}

/// Run the dashboard until the user quits or a shutdown signal arrives.
///
/// The first page is requested before the loop starts. A panic hook puts
/// the terminal back before the default hook prints.
pub async fn run(
    app: &mut App,
    event_tx: mpsc::Sender<AppEvent>,
    mut event_rx: mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut session = TerminalSession::enter()?;
    let mut input = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    refresh_feed(app, &event_tx);

    loop {
        if app.clear_expired_status() {
            app.needs_redraw = true;
        }
        // Finished fetches first, so held-down keys cannot starve them.
        while let Ok(event) = event_rx.try_recv() {
            handle_app_event(app, event, &event_tx);
            app.needs_redraw = true;
        }
        if app.needs_redraw {
            session.terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            biased;

            name = &mut shutdown => {
                tracing::info!(signal = name, "Shutting down");
                break;
            }

            event = input.next() => match event {
                Some(Ok(Event::Key(key))) => {
                    if let Action::Quit = on_key(app, key, &event_tx).await {
                        break;
                    }
                }
                Some(Ok(Event::Resize(..))) => app.needs_redraw = true,
                Some(Ok(_)) => {}
                Some(Err(e)) => tracing::warn!(error = %e, "Terminal event error"),
                None => break,
            },

            Some(event) = event_rx.recv() => {
                handle_app_event(app, event, &event_tx);
                app.needs_redraw = true;
            }

            _ = ticker.tick() => on_tick(app, &event_tx),
        }
    }

    drop(session);
    Ok(())
}

async fn on_key(app: &mut App, key: KeyEvent, event_tx: &mpsc::Sender<AppEvent>) -> Action {
    // Windows reports releases too.
    if key.kind == KeyEventKind::Release {
        return Action::Continue;
    }
    app.needs_redraw = true;
    match handle_input(app, key.code, key.modifiers, event_tx).await {
        Ok(action) => action,
        Err(e) => {
            tracing::warn!(error = %e, "Key handler failed");
            app.set_status(format!("Error: {e}"));
            Action::Continue
        }
    }
}

/// Spinner frame, debounced search, then the infinite-scroll check.
fn on_tick(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if app.content.state().loading {
        app.spinner_frame = (app.spinner_frame + 1) % SPINNER.len();
        app.needs_redraw = true;
    }

    if app.apply_debounced_search() {
        app.needs_redraw = true;
        load_more_if_needed(app, event_tx);
    }
}
