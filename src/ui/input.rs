//! Input handling for the TUI.
//!
//! Routes key presses through the keybinding registry. Overlays capture
//! input first: help, then confirmation, then preferences, then search.

use crate::app::{App, AppEvent, ConfirmAction, Focus};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::util::MAX_SEARCH_QUERY_LENGTH;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::{load_more_if_needed, open_selected_link, refresh_feed};
use super::Action;

/// Map the focused panel to its keybinding context.
fn focus_to_context(focus: Focus) -> KbContext {
    match focus {
        Focus::Sidebar => KbContext::Sidebar,
        Focus::Cards => KbContext::Cards,
    }
}

/// Main input dispatch function.
pub(super) async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    if app.pending_confirm.is_some() {
        return Ok(handle_confirm_input(app, code, modifiers).await);
    }

    if app.preferences_panel.is_some() {
        return Ok(handle_preferences_input(app, code, modifiers, event_tx).await);
    }

    if app.search_mode {
        return Ok(handle_search_input(app, code, modifiers, event_tx));
    }

    handle_main_input(app, code, modifiers, event_tx).await
}

/// Help overlay: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

async fn handle_confirm_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Confirm)
    {
        Some(KbAction::Confirm) => match app.pending_confirm.take() {
            Some(ConfirmAction::ClearFavorites) => {
                let count = app.favorites.len();
                app.clear_favorites().await;
                tracing::info!(count, "Cleared favorites");
                app.set_status(format!("Removed {} favorites", count));
            }
            None => {}
        },
        Some(KbAction::Cancel) => {
            app.pending_confirm = None;
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Action::Continue
}

async fn handle_preferences_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Preferences)
    {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::Back) | Some(KbAction::OpenPreferences) => {
            app.preferences_panel = None;
        }
        Some(KbAction::NavDown) => app.preferences_nav(true),
        Some(KbAction::NavUp) => app.preferences_nav(false),
        Some(KbAction::ToggleCategory) => {
            if let Some(category) = app.preferences_category() {
                let selected = app.preferences.toggle_category(category).await;
                tracing::info!(category, selected, "Toggled category");
                // The feed is built from the selected categories.
                refresh_feed(app, event_tx);
            }
        }
        Some(KbAction::ToggleDarkMode) => toggle_dark_mode(app).await,
        Some(KbAction::CycleLanguage) => cycle_language(app).await,
        _ => {}
    }
    Action::Continue
}

/// Search input: Enter applies, Esc clears, anything else is typed.
fn handle_search_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Search)
    {
        Some(KbAction::CommitSearch) => {
            app.commit_search();
            load_more_if_needed(app, event_tx);
            return Action::Continue;
        }
        Some(KbAction::ExitSearch) => {
            app.clear_search();
            return Action::Continue;
        }
        _ => {}
    }

    match code {
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            if app.search_input.chars().count() >= MAX_SEARCH_QUERY_LENGTH {
                app.set_status(format!(
                    "Search query at max length ({} chars)",
                    MAX_SEARCH_QUERY_LENGTH
                ));
            } else {
                app.push_search_char(c);
            }
        }
        _ => {}
    }
    Action::Continue
}

/// Sidebar and card list.
async fn handle_main_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    let context = focus_to_context(app.focus);
    let Some(action) = app.keybindings.action_for_key(code, modifiers, context) else {
        return Ok(Action::Continue);
    };

    match action {
        KbAction::Quit => return Ok(Action::Quit),
        KbAction::Back => {
            if !app.search_query.is_empty() {
                app.clear_search();
            } else if app.focus == Focus::Sidebar {
                app.focus = Focus::Cards;
            }
        }
        KbAction::NavDown => {
            app.nav_down();
            if app.focus == Focus::Cards {
                load_more_if_needed(app, event_tx);
            }
        }
        KbAction::NavUp => app.nav_up(),
        KbAction::CycleFocus => app.cycle_focus(),
        KbAction::Select => {
            app.open_selected_section();
            load_more_if_needed(app, event_tx);
        }
        KbAction::Refresh => {
            if app.section.shows_feed() {
                refresh_feed(app, event_tx);
                app.set_status("Refreshing...");
            }
        }
        KbAction::ToggleFavorite => match app.toggle_selected_favorite().await {
            Some(true) => app.set_status("Added to favorites"),
            Some(false) => app.set_status("Removed from favorites"),
            None => {}
        },
        KbAction::OpenLink => open_selected_link(app),
        KbAction::MoveItemUp | KbAction::MoveItemDown => {
            if !app.section.is_reorderable() {
                app.set_status("Cards can only be reordered in My Feed");
            } else {
                let delta = if action == KbAction::MoveItemUp { -1 } else { 1 };
                app.move_selected(delta)?;
            }
        }
        KbAction::EnterSearch => app.enter_search(),
        KbAction::ToggleDarkMode => toggle_dark_mode(app).await,
        KbAction::OpenPreferences => app.open_preferences(),
        KbAction::CycleLanguage => cycle_language(app).await,
        KbAction::ClearFavorites => {
            if app.favorites.is_empty() {
                app.set_status("No favorites to clear");
            } else {
                app.pending_confirm = Some(ConfirmAction::ClearFavorites);
            }
        }
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        KbAction::ExitSearch
        | KbAction::CommitSearch
        | KbAction::ToggleCategory
        | KbAction::Confirm
        | KbAction::Cancel => {}
    }
    Ok(Action::Continue)
}

async fn toggle_dark_mode(app: &mut App) {
    let variant = app.toggle_dark_mode().await;
    app.set_status(format!("Theme: {}", variant.name()));
}

async fn cycle_language(app: &mut App) {
    let language = app.preferences.cycle_language().await.to_string();
    app.set_status(format!("Language: {}", language));
}
