//! Render functions for the TUI.
//!
//! Lays out header, sidebar, cards and status bar, then draws any active
//! overlay on top.

use crate::app::{App, ConfirmAction};
use crate::content::AVAILABLE_CATEGORIES;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{cards, header, help, sidebar, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 12;

/// Sidebar width in columns.
const SIDEBAR_WIDTH: u16 = 24;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    header::render(f, app, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(rows[1]);

    sidebar::render(f, app, columns[0]);
    cards::render(f, app, columns[1]);
    status::render(f, app, rows[2]);

    if app.preferences_panel.is_some() {
        render_preferences_overlay(f, app);
    }

    if let Some(confirm) = app.pending_confirm {
        render_confirm_overlay(f, app, confirm);
    }

    if app.show_help {
        help::render(f, app);
    }
}

/// Fixed-size rectangle centered in `area`, shrunk to fit.
pub(super) fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Category checklist plus the current theme and language.
fn render_preferences_overlay(f: &mut Frame, app: &App) {
    let Some(panel) = app.preferences_panel else {
        return;
    };

    let height = AVAILABLE_CATEGORIES.len() as u16 + 8;
    let overlay = centered_fixed(44, height, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }
    f.render_widget(Clear, overlay);

    let mut lines = vec![Line::from(Span::styled(
        "Content categories",
        app.style("card_title"),
    ))];
    for (i, category) in AVAILABLE_CATEGORIES.iter().enumerate() {
        let checked = app.preferences.has_category(category);
        let mark = if checked { "[x]" } else { "[ ]" };
        let style = if i == panel.selected {
            app.style("overlay_selected")
        } else if checked {
            app.style("overlay_checked")
        } else {
            app.style("sidebar_item")
        };
        lines.push(Line::from(Span::styled(
            format!(" {} {}", mark, capitalize(category)),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Theme:    ", app.style("card_meta")),
        Span::raw(app.theme_variant.name()),
        Span::styled("   Language: ", app.style("card_meta")),
        Span::raw(app.preferences.language().to_uppercase()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "(Space) Toggle  (l) Language  (T) Theme  (Esc) Close",
        app.style("feed_hint"),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("overlay_border"))
            .title(" Preferences "),
    );
    f.render_widget(paragraph, overlay);
}

fn render_confirm_overlay(f: &mut Frame, app: &App, confirm: ConfirmAction) {
    let text = format!(
        "{}\n\nThis cannot be undone.\n\n(y) Confirm  (n/Esc) Cancel",
        confirm.prompt()
    );

    let overlay = centered_fixed(44, 8, f.area());
    if overlay.width < 10 || overlay.height < 5 {
        return;
    }
    f.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("overlay_border"))
                .title(" Confirm "),
        )
        .alignment(Alignment::Center);
    f.render_widget(paragraph, overlay);
}

pub(super) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
