use crate::app::{App, Focus, Section};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

const TAGLINE: &str = "Your personalized dashboard";

/// Section list. The active section is highlighted, the cursor is shown
/// while the sidebar has focus.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus == Focus::Sidebar;

    let mut items: Vec<ListItem> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let style = if is_focused && i == app.sidebar_selected {
                app.style("sidebar_selected")
            } else if *section == app.section {
                app.style("sidebar_active")
            } else {
                app.style("sidebar_item")
            };

            let mut spans = vec![Span::styled(
                format!(" {} {}", section.glyph(), section.label()),
                style,
            )];
            if *section == Section::Favorites && !app.favorites.is_empty() {
                spans.push(Span::styled(
                    format!(" ({})", app.favorites.len()),
                    app.style("card_favorite"),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    items.push(ListItem::new(""));
    items.push(ListItem::new(Line::from(Span::styled(
        format!(" {}", TAGLINE),
        app.style("feed_hint"),
    ))));

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Sections "),
    );
    f.render_widget(list, area);
}
