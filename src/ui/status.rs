use crate::app::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the status bar: message or key hints on the left, feed counters
/// on the right.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(&**msg)
    } else if app.search_mode {
        Cow::Borrowed("Type to search | Esc clear | Enter apply")
    } else {
        match app.focus {
            Focus::Sidebar => Cow::Borrowed("[j/k]move [Enter]open [Tab]cards [p]refs [?]help [q]uit"),
            Focus::Cards if app.section.is_reorderable() => Cow::Borrowed(
                "[f]avorite [o]pen [J/K]reorder [/]search [r]efresh [T]heme [p]refs [?]help [q]uit",
            ),
            Focus::Cards => Cow::Borrowed(
                "[f]avorite [o]pen [/]search [r]efresh [T]heme [C]lear favs [?]help [q]uit",
            ),
        }
    };

    let state = app.content.state();
    let counters = format!(
        " {} items | page {} | ★ {} ",
        state.items.len(),
        state.page,
        app.favorites.len()
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(counters.chars().count() as u16),
        ])
        .split(area);

    let style = app.style("status_bar");
    f.render_widget(Paragraph::new(text).style(style), columns[0]);
    f.render_widget(Paragraph::new(counters).style(style), columns[1]);
}
