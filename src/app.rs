use crate::config::Config;
use crate::content::{ContentItem, ContentSource, ContentType, FetchError, AVAILABLE_CATEGORIES};
use crate::feed::{filter_items, narrow_to_type, ReorderError};
use crate::keybindings::KeybindingRegistry;
use crate::state::{ContentStore, FavoritesStore, FetchTicket, PreferencesStore};
use crate::theme::{StyleMap, ThemeVariant};
use ratatui::style::Style;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(3);

// ============================================================================
// Sections and Focus
// ============================================================================

/// Sidebar entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Feed,
    Favorites,
    Trending,
    News,
    Movies,
    Social,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Feed,
        Section::Favorites,
        Section::Trending,
        Section::News,
        Section::Movies,
        Section::Social,
    ];

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Feed => "My Feed",
            Self::Favorites => "Favorites",
            Self::Trending => "Trending",
            Self::News => "News",
            Self::Movies => "Movies",
            Self::Social => "Social",
        }
    }

    /// Heading shown above the cards.
    pub fn title(self) -> &'static str {
        match self {
            Self::Feed => "My Feed",
            Self::Favorites => "My Favorites",
            Self::Trending => "Trending Now",
            Self::News => "Latest News",
            Self::Movies => "Movies & Shows",
            Self::Social => "Social Feed",
        }
    }

    /// Subtitle for feed sections. Favorites shows a count instead.
    pub fn subtitle(self) -> &'static str {
        match self {
            Self::Feed => "Personalized content based on your preferences",
            Self::Favorites => "",
            Self::Trending => "Most popular content across all categories",
            Self::News => "Breaking news and updates",
            Self::Movies => "Recommended entertainment for you",
            Self::Social => "Trending posts and updates",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Feed => "⌂",
            Self::Favorites => "★",
            Self::Trending => "↗",
            Self::News => "▤",
            Self::Movies => "▶",
            Self::Social => "✉",
        }
    }

    /// Content type a section narrows the feed to, if any.
    pub fn kind_filter(self) -> Option<ContentType> {
        match self {
            Self::News => Some(ContentType::News),
            Self::Movies => Some(ContentType::Movie),
            Self::Social => Some(ContentType::Social),
            Self::Feed | Self::Favorites | Self::Trending => None,
        }
    }

    /// Whether the section pages through the fetched feed.
    pub fn shows_feed(self) -> bool {
        self != Self::Favorites
    }

    /// Cards can only be moved in My Feed.
    pub fn is_reorderable(self) -> bool {
        self == Self::Feed
    }
}

/// Which panel has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Cards,
}

// ============================================================================
// Overlays
// ============================================================================

/// Pending confirmation for destructive operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    ClearFavorites,
}

impl ConfirmAction {
    pub fn prompt(self) -> &'static str {
        match self {
            Self::ClearFavorites => "Remove all favorites?",
        }
    }
}

/// State of the preferences overlay: a cursor over the category list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreferencesPanel {
    pub selected: usize,
}

// ============================================================================
// Events
// ============================================================================

/// Events from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    /// A page fetch finished.
    ContentFetched {
        ticket: FetchTicket,
        result: Result<Vec<ContentItem>, FetchError>,
    },
    /// A background task panicked.
    ///
    /// `ticket` is set when the task was a fetch, so its loading state can
    /// be cleared.
    TaskPanicked {
        task: &'static str,
        ticket: Option<FetchTicket>,
        error: String,
    },
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    // Stores
    pub content: ContentStore,
    pub preferences: PreferencesStore,
    pub favorites: FavoritesStore,
    pub source: Arc<dyn ContentSource>,

    // Presentation
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,
    pub keybindings: KeybindingRegistry,

    // Navigation
    pub section: Section,
    pub focus: Focus,
    /// Sidebar cursor (index into `Section::ALL`).
    pub sidebar_selected: usize,
    /// Card cursor (index into `visible_items()`).
    pub selected_card: usize,

    // Search
    pub search_mode: bool,
    /// Text as typed.
    pub search_input: String,
    /// Query the card list is filtered by. Trails `search_input` by the
    /// debounce delay.
    pub search_query: String,
    /// Time of the last keystroke not yet applied.
    pub search_debounce: Option<Instant>,
    pub search_debounce_delay: Duration,

    /// Load the next page once fewer than this many cards remain below the
    /// selection.
    pub load_more_threshold: usize,

    // Chrome
    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub needs_redraw: bool,
    pub spinner_frame: usize,
    pub show_help: bool,
    pub help_scroll_offset: usize,
    pub preferences_panel: Option<PreferencesPanel>,
    pub pending_confirm: Option<ConfirmAction>,

    /// Handle to the in-flight fetch task, aborted when superseded.
    pub fetch_handle: Option<tokio::task::JoinHandle<()>>,
}

impl App {
    /// Build the app around loaded stores. Keybinding overrides from
    /// `config` are applied here; bad entries are logged and skipped.
    pub fn new(
        config: &Config,
        source: Arc<dyn ContentSource>,
        preferences: PreferencesStore,
        favorites: FavoritesStore,
    ) -> Self {
        let mut keybindings = KeybindingRegistry::new();
        for warning in keybindings.apply_overrides(&config.keybindings) {
            tracing::warn!(warning = %warning, "Keybinding override ignored");
        }

        let theme_variant = ThemeVariant::from_dark_mode(preferences.dark_mode());

        Self {
            content: ContentStore::new(),
            preferences,
            favorites,
            source,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            section: Section::Feed,
            focus: Focus::Cards,
            sidebar_selected: 0,
            selected_card: 0,
            search_mode: false,
            search_input: String::new(),
            search_query: String::new(),
            search_debounce: None,
            search_debounce_delay: config.search_debounce(),
            load_more_threshold: config.load_more_threshold.max(1),
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
            show_help: false,
            help_scroll_offset: 0,
            preferences_panel: None,
            pending_confirm: None,
            fetch_handle: None,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    // ========================================================================
    // Views
    // ========================================================================

    /// Cards of the current section, in display order.
    ///
    /// Feed sections apply the search query, then the section's type filter.
    /// Favorites are shown as stored.
    pub fn visible_items(&self) -> Vec<&ContentItem> {
        if !self.section.shows_feed() {
            return self.favorites.items().iter().collect();
        }
        narrow_to_type(
            filter_items(self.content.items(), &self.search_query),
            self.section.kind_filter(),
        )
    }

    pub fn selected_item(&self) -> Option<&ContentItem> {
        self.visible_items().get(self.selected_card).copied()
    }

    /// Keep the card cursor inside the visible list.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_items().len();
        self.selected_card = self.selected_card.min(len.saturating_sub(1));
    }

    /// The selection is close enough to the end of the list that the next
    /// page should be requested.
    pub fn near_end(&self) -> bool {
        if !self.section.shows_feed() {
            return false;
        }
        let len = self.visible_items().len();
        len.saturating_sub(self.selected_card + 1) < self.load_more_threshold
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn nav_up(&mut self) {
        match self.focus {
            Focus::Sidebar => self.sidebar_selected = self.sidebar_selected.saturating_sub(1),
            Focus::Cards => self.selected_card = self.selected_card.saturating_sub(1),
        }
    }

    pub fn nav_down(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                let max_index = Section::ALL.len() - 1;
                self.sidebar_selected = (self.sidebar_selected + 1).min(max_index);
            }
            Focus::Cards => {
                let len = self.visible_items().len();
                if len > 0 {
                    self.selected_card = (self.selected_card + 1).min(len - 1);
                }
            }
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Cards,
            Focus::Cards => {
                self.sidebar_selected = self.section_index();
                Focus::Sidebar
            }
        };
    }

    fn section_index(&self) -> usize {
        Section::ALL
            .iter()
            .position(|s| *s == self.section)
            .unwrap_or(0)
    }

    /// Switch to the section under the sidebar cursor and focus its cards.
    pub fn open_selected_section(&mut self) {
        let section = Section::ALL
            .get(self.sidebar_selected)
            .copied()
            .unwrap_or(Section::Feed);
        self.select_section(section);
    }

    pub fn select_section(&mut self, section: Section) {
        if self.section != section {
            tracing::debug!(section = section.label(), "Switched section");
        }
        self.section = section;
        self.sidebar_selected = self.section_index();
        self.selected_card = 0;
        self.focus = Focus::Cards;
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub fn enter_search(&mut self) {
        self.search_mode = true;
        self.search_input = self.search_query.clone();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.search_debounce = Some(Instant::now());
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
        self.search_debounce = Some(Instant::now());
    }

    /// Apply the typed query once the input has been idle for the debounce
    /// delay. Returns true if the query changed.
    pub fn apply_debounced_search(&mut self) -> bool {
        match self.search_debounce {
            Some(last) if last.elapsed() >= self.search_debounce_delay => self.apply_search(),
            _ => false,
        }
    }

    /// Apply the typed query immediately and leave the search input.
    pub fn commit_search(&mut self) {
        self.apply_search();
        self.search_mode = false;
    }

    /// Drop the query and leave the search input.
    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.apply_search();
        self.search_mode = false;
    }

    fn apply_search(&mut self) -> bool {
        self.search_debounce = None;
        if self.search_query == self.search_input {
            return false;
        }
        self.search_query = self.search_input.clone();
        self.selected_card = 0;
        tracing::debug!(query = %self.search_query, "Applied search filter");
        true
    }

    // ========================================================================
    // Store mutations
    // ========================================================================

    /// Toggle the selected card's favorite status. Returns the new status,
    /// or None when no card is selected.
    pub async fn toggle_selected_favorite(&mut self) -> Option<bool> {
        let item = self.selected_item()?.clone();
        let now_favorite = self.favorites.toggle(&item).await;
        if self.section == Section::Favorites {
            self.clamp_selection();
        }
        Some(now_favorite)
    }

    pub async fn clear_favorites(&mut self) {
        self.favorites.clear().await;
        if self.section == Section::Favorites {
            self.selected_card = 0;
        }
    }

    /// Flip dark mode and restyle. Returns the new theme variant.
    pub async fn toggle_dark_mode(&mut self) -> ThemeVariant {
        let dark = self.preferences.toggle_dark_mode().await;
        let variant = ThemeVariant::from_dark_mode(dark);
        self.set_theme(variant);
        variant
    }

    /// Move the selected card one slot up (`-1`) or down (`1`) among the
    /// visible cards.
    ///
    /// Returns `Ok(false)` when there is nowhere to move. The move is
    /// resolved by id against the stored feed, so cards hidden by the search
    /// filter keep their place.
    pub fn move_selected(&mut self, delta: isize) -> Result<bool, ReorderError> {
        if !self.section.is_reorderable() {
            return Ok(false);
        }
        let Some(target) = self.selected_card.checked_add_signed(delta) else {
            return Ok(false);
        };

        let visible = self.visible_items();
        let (Some(active), Some(over)) = (visible.get(self.selected_card), visible.get(target))
        else {
            return Ok(false);
        };
        let (active_id, over_id) = (active.id.clone(), over.id.clone());

        self.content.reorder(&active_id, &over_id)?;
        self.selected_card = target;
        Ok(true)
    }

    // ========================================================================
    // Preferences overlay
    // ========================================================================

    pub fn open_preferences(&mut self) {
        self.preferences_panel = Some(PreferencesPanel::default());
    }

    pub fn preferences_nav(&mut self, down: bool) {
        if let Some(panel) = self.preferences_panel.as_mut() {
            panel.selected = if down {
                (panel.selected + 1).min(AVAILABLE_CATEGORIES.len() - 1)
            } else {
                panel.selected.saturating_sub(1)
            };
        }
    }

    /// Category under the preferences cursor.
    pub fn preferences_category(&self) -> Option<&'static str> {
        self.preferences_panel
            .and_then(|panel| AVAILABLE_CATEGORIES.get(panel.selected).copied())
    }

    // ========================================================================
    // Status and fetch bookkeeping
    // ========================================================================

    /// Set status message (expires after a few seconds).
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear the status message if it has expired. Returns true if cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed() >= STATUS_TTL {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Abort the in-flight fetch task, if any.
    pub fn abort_fetch(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
            tracing::debug!("Aborted superseded fetch task");
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.abort_fetch();
    }
}

/// App over in-memory storage and an instant mock source.
#[cfg(test)]
pub(crate) async fn test_app_with(storage: Arc<crate::storage::MemoryStore>) -> App {
    let config = Config::default();
    let prefs = PreferencesStore::load(storage.clone(), config.preference_defaults())
        .await
        .unwrap();
    let favorites = FavoritesStore::load(storage).await.unwrap();
    let source = Arc::new(crate::content::MockContentSource::new(Duration::ZERO, 10));
    App::new(&config, source, prefs, favorites)
}

#[cfg(test)]
pub(crate) async fn test_app() -> App {
    test_app_with(Arc::new(crate::storage::MemoryStore::new())).await
}
