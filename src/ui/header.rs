use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BRAND: &str = "ContentHub";
const SEARCH_PLACEHOLDER: &str = "Search content... (/)";

/// Brand, search box and theme/language indicators.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Min(10),
            Constraint::Length(12),
        ])
        .split(area);

    let brand = Paragraph::new(Line::from(Span::styled(
        format!(" {}", BRAND),
        app.style("header_title"),
    )))
    .block(Block::default().borders(Borders::BOTTOM | Borders::TOP));
    f.render_widget(brand, columns[0]);

    let (text, style) = if app.search_mode {
        (format!("{}_", app.search_input), app.style("search_active"))
    } else if !app.search_query.is_empty() {
        (app.search_query.clone(), app.style("search_idle"))
    } else {
        (SEARCH_PLACEHOLDER.to_string(), app.style("search_idle"))
    };
    let border = if app.search_mode {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    let search = Paragraph::new(Line::from(Span::styled(text, style))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search "),
    );
    f.render_widget(search, columns[1]);

    let indicators = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(app.theme_variant.indicator(), app.style("header_title")),
        Span::raw("  "),
        Span::styled(
            app.preferences.language().to_uppercase(),
            app.style("card_meta"),
        ),
    ]))
    .block(Block::default().borders(Borders::BOTTOM | Borders::TOP));
    f.render_widget(indicators, columns[2]);
}
