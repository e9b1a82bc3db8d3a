use crate::app::{App, Focus, Section};
use crate::content::ContentItem;
use crate::util::truncate_to_width;
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::render::capitalize;

/// Loading spinner glyphs, advanced on each tick while a fetch is in flight.
pub(super) const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Age of an item relative to `now`: minutes, hours or days, then a date.
pub(super) fn format_age(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - date).num_seconds();
    if diff < 60 {
        return "just now".to_string();
    }
    if diff < 3600 {
        return format!("{}m ago", diff / 60);
    }
    if diff < 86400 {
        return format!("{}h ago", diff / 3600);
    }
    if diff < 604800 {
        return format!("{}d ago", diff / 86400);
    }
    date.format("%b %d, %Y").to_string()
}

/// Section heading, subtitle and the card list.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus == Focus::Cards;
    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", app.section.title()));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width < 4 || inner.height < 3 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let subtitle = match app.section {
        Section::Favorites => format!("{} saved items", app.favorites.len()),
        section => section.subtitle().to_string(),
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(subtitle, app.style("card_meta")))),
        rows[0],
    );

    let visible = app.visible_items();
    if visible.is_empty() {
        render_empty(f, app, rows[1]);
        return;
    }

    let width = rows[1].width.saturating_sub(2) as usize;
    let now = Utc::now();
    let mut items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, item)| card(app, item, i == app.selected_card && is_focused, width, now))
        .collect();

    if let Some(footer) = footer_line(app) {
        items.push(ListItem::new(footer));
    }

    let mut state = ListState::default().with_selected(Some(app.selected_card));
    f.render_stateful_widget(List::new(items), rows[1], &mut state);
}

/// One card: kind and category, title, description, source and age.
fn card<'a>(
    app: &App,
    item: &'a ContentItem,
    selected: bool,
    width: usize,
    now: DateTime<Utc>,
) -> ListItem<'a> {
    let mut header = vec![
        Span::styled(
            format!("{} {}", item.kind.glyph(), capitalize(item.kind.as_str())),
            app.style("card_kind"),
        ),
        Span::styled(
            format!(" · {}", capitalize(&item.category)),
            app.style("card_meta"),
        ),
    ];
    if app.favorites.is_favorite(&item.id) {
        header.push(Span::styled(" ★", app.style("card_favorite")));
    }
    if app.section.is_reorderable() && selected {
        header.push(Span::styled("  J/K to move", app.style("feed_hint")));
    }

    let lines = vec![
        Line::from(header),
        Line::from(Span::styled(
            truncate_to_width(&item.title, width).into_owned(),
            app.style("card_title"),
        )),
        Line::from(Span::styled(
            truncate_to_width(&item.description, width).into_owned(),
            app.style("card_description"),
        )),
        Line::from(Span::styled(
            format!("{} · {}", item.source, format_age(item.date, now)),
            app.style("card_meta"),
        )),
        Line::from(""),
    ];

    let style = if selected {
        app.style("card_selected")
    } else {
        Style::default()
    };
    ListItem::new(lines).style(style)
}

/// Pagination status shown below the last card of a feed section.
fn footer_line(app: &App) -> Option<Line<'static>> {
    if !app.section.shows_feed() {
        return None;
    }
    let state = app.content.state();
    let line = if state.loading {
        Line::from(Span::styled(
            format!("{} Loading more...", SPINNER[app.spinner_frame % SPINNER.len()]),
            app.style("feed_hint"),
        ))
    } else if let Some(error) = &state.error {
        Line::from(Span::styled(
            format!("{}. Scroll down to retry, r to reload", error),
            app.style("feed_error"),
        ))
    } else if !state.has_more {
        Line::from(Span::styled("No more content", app.style("feed_hint")))
    } else {
        return None;
    };
    Some(line)
}

fn render_empty(f: &mut Frame, app: &App, area: Rect) {
    let state = app.content.state();
    let (headline, detail, style) = if app.section == Section::Favorites {
        (
            "No favorites yet".to_string(),
            "Start adding content to your favorites with f".to_string(),
            app.style("card_title"),
        )
    } else if state.loading {
        (
            format!("{} Loading content...", SPINNER[app.spinner_frame % SPINNER.len()]),
            String::new(),
            app.style("feed_hint"),
        )
    } else if let Some(error) = &state.error {
        (
            error.clone(),
            "Press r to retry".to_string(),
            app.style("feed_error"),
        )
    } else if !app.search_query.is_empty() {
        (
            format!("No results for \"{}\"", app.search_query),
            "Press Esc to clear the search".to_string(),
            app.style("card_title"),
        )
    } else {
        (
            "Nothing to show".to_string(),
            "Press r to refresh or p to pick categories".to_string(),
            app.style("card_title"),
        )
    };

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(headline, style)),
        Line::from(Span::styled(detail, app.style("feed_hint"))),
    ])
    .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_age_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(format_age(now - Duration::seconds(30), now), "just now");
        assert_eq!(format_age(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(format_age(now - Duration::hours(3), now), "3h ago");
        assert_eq!(format_age(now - Duration::days(2), now), "2d ago");
        assert_eq!(format_age(now - Duration::days(30), now), "May 16, 2024");
    }

    #[test]
    fn test_format_age_future_is_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(format_age(now + Duration::hours(1), now), "just now");
    }
}
