//! Help overlay listing the active keybindings.
//!
//! Keys bound to the same action in one context share a row, so a user
//! override shows up next to the default it replaced or joined.

use crate::app::App;
use crate::keybindings::{Action, Context};
use ratatui::{
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::render::centered_fixed;

/// Context display order for the help screen.
const CONTEXT_ORDER: [Context; 6] = [
    Context::Global,
    Context::Sidebar,
    Context::Cards,
    Context::Search,
    Context::Preferences,
    Context::Confirm,
];

const KEY_COLUMN: usize = 18;

/// One line per (context heading | action row | blank separator).
fn help_lines(app: &App) -> Vec<Line<'static>> {
    let bindings = app.keybindings.all_bindings();
    let mut lines = Vec::new();

    for ctx in CONTEXT_ORDER {
        let mut rows: Vec<(Action, Vec<String>, &'static str)> = Vec::new();
        for (c, key, action, description) in &bindings {
            if *c != ctx {
                continue;
            }
            match rows.iter_mut().find(|(a, _, _)| a == action) {
                Some((_, keys, _)) => keys.push(key.clone()),
                None => rows.push((*action, vec![key.clone()], description)),
            }
        }
        if rows.is_empty() {
            continue;
        }

        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            ctx.label().to_string(),
            app.style("header_title").add_modifier(Modifier::BOLD),
        )));
        for (_, keys, description) in rows {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<width$}", keys.join(", "), width = KEY_COLUMN),
                    app.style("card_meta"),
                ),
                Span::styled(description.to_string(), app.style("sidebar_item")),
            ]));
        }
    }
    lines
}

/// Draw the overlay, scrolled by `app.help_scroll_offset`.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_fixed(64, 30, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }
    f.render_widget(Clear, overlay);

    let lines = help_lines(app);
    let visible = overlay.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(visible);
    let scroll = app.help_scroll_offset.min(max_scroll);

    let title = if max_scroll > 0 {
        format!(" Keys {}/{} (j/k scroll, Esc close) ", scroll + 1, max_scroll + 1)
    } else {
        " Keys (Esc to close) ".to_string()
    };

    let body = Paragraph::new(lines)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("overlay_border"))
                .title(title),
        );
    f.render_widget(body, overlay);
}
