//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! `ThemeVariant` follows the dark-mode preference and selects between the
//! Dark and Light palettes; `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    /// Header indicator: sun in dark mode (switch to light), moon otherwise.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Dark => "☀",
            Self::Light => "☾",
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Header --
    pub header_title: Style,
    pub search_idle: Style,
    pub search_active: Style,

    // -- Sidebar --
    pub sidebar_item: Style,
    pub sidebar_active: Style,
    pub sidebar_selected: Style,

    // -- Cards --
    pub card_title: Style,
    pub card_description: Style,
    pub card_meta: Style,
    pub card_kind: Style,
    pub card_favorite: Style,
    pub card_selected: Style,
    pub feed_hint: Style,
    pub feed_error: Style,

    // -- Overlays --
    pub overlay_border: Style,
    pub overlay_checked: Style,
    pub overlay_selected: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            header_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            search_idle: Style::default().fg(Color::Gray),
            search_active: Style::default().fg(Color::White).bg(Color::Black),

            sidebar_item: Style::default(),
            sidebar_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            sidebar_selected: Style::default().bg(Color::DarkGray).fg(Color::White),

            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_description: Style::default().fg(Color::Gray),
            card_meta: Style::default().fg(Color::DarkGray),
            card_kind: Style::default().fg(Color::Cyan),
            card_favorite: Style::default().fg(Color::Yellow),
            card_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            feed_hint: Style::default().fg(Color::DarkGray),
            feed_error: Style::default().fg(Color::Red),

            overlay_border: Style::default().fg(Color::Yellow),
            overlay_checked: Style::default().fg(Color::Green),
            overlay_selected: Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    /// Adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            header_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            search_idle: Style::default().fg(Color::DarkGray),
            search_active: Style::default().fg(Color::Black).bg(Color::White),

            sidebar_item: Style::default().fg(Color::Black),
            sidebar_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            sidebar_selected: Style::default().bg(Color::Blue).fg(Color::White),

            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_description: Style::default().fg(Color::DarkGray),
            card_meta: Style::default().fg(Color::DarkGray),
            card_kind: Style::default().fg(Color::Blue),
            card_favorite: Style::default().fg(Color::Magenta),
            card_selected: Style::default().bg(Color::Blue).fg(Color::White),
            feed_hint: Style::default().fg(Color::DarkGray),
            feed_error: Style::default().fg(Color::Red),

            overlay_border: Style::default().fg(Color::Magenta),
            overlay_checked: Style::default().fg(Color::Green),
            overlay_selected: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

// ============================================================================
// Style Map: string-keyed lookup
// ============================================================================

/// String-keyed style lookup, built from a `ColorPalette`, so render code can
/// resolve role names (e.g. `"card_title"`) at draw time.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 20] = [
    "header_title",
    "search_idle",
    "search_active",
    "sidebar_item",
    "sidebar_active",
    "sidebar_selected",
    "card_title",
    "card_description",
    "card_meta",
    "card_kind",
    "card_favorite",
    "card_selected",
    "feed_hint",
    "feed_error",
    "overlay_border",
    "overlay_checked",
    "overlay_selected",
    "status_bar",
    "panel_border",
    "panel_border_focused",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 20] = [
            p.header_title,
            p.search_idle,
            p.search_active,
            p.sidebar_item,
            p.sidebar_active,
            p.sidebar_selected,
            p.card_title,
            p.card_description,
            p.card_meta,
            p.card_kind,
            p.card_favorite,
            p.card_selected,
            p.feed_hint,
            p.feed_error,
            p.overlay_border,
            p.overlay_checked,
            p.overlay_selected,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_follows_dark_mode() {
        assert_eq!(ThemeVariant::from_dark_mode(true), ThemeVariant::Dark);
        assert_eq!(ThemeVariant::from_dark_mode(false), ThemeVariant::Light);
        assert_eq!(ThemeVariant::Dark.name(), "Dark");
    }

    #[test]
    fn indicator_differs_per_variant() {
        assert_ne!(
            ThemeVariant::Dark.indicator(),
            ThemeVariant::Light.indicator()
        );
    }

    #[test]
    fn light_palette_differs_from_dark() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(dark.card_selected, light.card_selected);
        assert_ne!(dark.status_bar, light.status_bar);
    }

    #[test]
    fn style_map_resolves_known_roles() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);

        assert_eq!(sm.resolve("card_selected"), palette.card_selected);
        assert_eq!(sm.resolve("header_title"), palette.header_title);
        assert_eq!(sm.resolve("status_bar"), palette.status_bar);
    }

    #[test]
    fn style_map_returns_default_for_unknown() {
        let palette = ThemeVariant::Light.palette();
        let sm = StyleMap::from_palette(&palette);
        assert_eq!(sm.resolve("nonexistent_role"), Style::default());
    }

    #[test]
    fn style_map_has_all_roles() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);
        assert_eq!(sm.map.len(), ROLE_NAMES.len());
        for name in ROLE_NAMES {
            assert!(sm.map.contains_key(name), "Role '{}' missing from StyleMap", name);
        }
    }
}
