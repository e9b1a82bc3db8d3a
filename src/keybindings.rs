//! Keybinding registry: maps key events to actions, with config overrides.
//!
//! Bindings are looked up per dispatch context first and fall back to
//! `Context::Global`. Users can rebind any action from config.toml.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    CycleFocus,
    Back,
    Select,
    Refresh,
    ToggleFavorite,
    OpenLink,
    MoveItemUp,
    MoveItemDown,
    EnterSearch,
    ExitSearch,
    CommitSearch,
    ToggleDarkMode,
    OpenPreferences,
    ToggleCategory,
    CycleLanguage,
    ClearFavorites,
    Confirm,
    Cancel,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Navigate down",
            Self::NavUp => "Navigate up",
            Self::CycleFocus => "Switch between sidebar and cards",
            Self::Back => "Go back / dismiss",
            Self::Select => "Open section",
            Self::Refresh => "Reload the feed from page 1",
            Self::ToggleFavorite => "Add or remove favorite",
            Self::OpenLink => "Open item link in browser",
            Self::MoveItemUp => "Move card up (My Feed)",
            Self::MoveItemDown => "Move card down (My Feed)",
            Self::EnterSearch => "Search loaded content",
            Self::ExitSearch => "Clear search",
            Self::CommitSearch => "Apply search now",
            Self::ToggleDarkMode => "Toggle dark mode",
            Self::OpenPreferences => "Preferences",
            Self::ToggleCategory => "Toggle category",
            Self::CycleLanguage => "Next language",
            Self::ClearFavorites => "Clear all favorites",
            Self::Confirm => "Confirm",
            Self::Cancel => "Cancel",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Sidebar,
    Cards,
    Search,
    Preferences,
    Confirm,
}

impl Context {
    /// Section heading for the help overlay.
    pub fn label(self) -> &'static str {
        match self {
            Self::Global => "General",
            Self::Sidebar => "Sidebar",
            Self::Cards => "Cards",
            Self::Search => "Search",
            Self::Preferences => "Preferences",
            Self::Confirm => "Confirm",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ch(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Up", "Down", "Backspace", "Space"
/// - Modifier combos: "Ctrl+d"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeySpec::ctrl(c)),
            _ => None,
        };
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "space" => return Some(KeySpec::ch(' ')),
        _ => {}
    }

    if let Some(n) = s.strip_prefix(['F', 'f']).and_then(|n| n.parse::<u8>().ok()) {
        return (1..=12).contains(&n).then(|| KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::ch(c)),
        _ => None,
    }
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts.
pub struct KeybindingRegistry {
    /// Primary lookup: (Context, KeySpec) -> Action
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings, in registration order, for the help screen
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use Action::*;
        use Context::*;

        // === Global ===
        self.bind(Global, KeySpec::ch('q'), Quit);
        self.bind(Global, KeySpec::ch('j'), NavDown);
        self.bind(Global, KeySpec::plain(KeyCode::Down), NavDown);
        self.bind(Global, KeySpec::ch('k'), NavUp);
        self.bind(Global, KeySpec::plain(KeyCode::Up), NavUp);
        self.bind(Global, KeySpec::plain(KeyCode::Tab), CycleFocus);
        self.bind(Global, KeySpec::plain(KeyCode::Esc), Back);
        self.bind(Global, KeySpec::ch('/'), EnterSearch);
        self.bind(Global, KeySpec::ch('r'), Refresh);
        self.bind(Global, KeySpec::ch('T'), ToggleDarkMode);
        self.bind(Global, KeySpec::ch('p'), OpenPreferences);
        self.bind(Global, KeySpec::ch('L'), CycleLanguage);
        self.bind(Global, KeySpec::ch('C'), ClearFavorites);
        self.bind(Global, KeySpec::ch('?'), ShowHelp);

        // === Sidebar ===
        self.bind(Sidebar, KeySpec::plain(KeyCode::Enter), Select);
        self.bind(Sidebar, KeySpec::plain(KeyCode::Right), CycleFocus);

        // === Cards ===
        self.bind(Cards, KeySpec::ch('f'), ToggleFavorite);
        self.bind(Cards, KeySpec::ch(' '), ToggleFavorite);
        self.bind(Cards, KeySpec::ch('o'), OpenLink);
        self.bind(Cards, KeySpec::plain(KeyCode::Enter), OpenLink);
        self.bind(Cards, KeySpec::ch('K'), MoveItemUp);
        self.bind(Cards, KeySpec::ch('J'), MoveItemDown);
        self.bind(Cards, KeySpec::plain(KeyCode::Left), CycleFocus);

        // === Search input ===
        self.bind(Search, KeySpec::plain(KeyCode::Esc), ExitSearch);
        self.bind(Search, KeySpec::plain(KeyCode::Enter), CommitSearch);

        // === Preferences overlay ===
        self.bind(Preferences, KeySpec::ch(' '), ToggleCategory);
        self.bind(Preferences, KeySpec::plain(KeyCode::Enter), ToggleCategory);
        self.bind(Preferences, KeySpec::ch('l'), CycleLanguage);
        self.bind(Preferences, KeySpec::ch('p'), Back);

        // === Confirm dialog ===
        self.bind(Context::Confirm, KeySpec::ch('y'), Action::Confirm);
        self.bind(Context::Confirm, KeySpec::plain(KeyCode::Enter), Action::Confirm);
        self.bind(Context::Confirm, KeySpec::ch('n'), Cancel);
        self.bind(Context::Confirm, KeySpec::plain(KeyCode::Esc), Cancel);
    }

    /// Apply user overrides from the config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "nav_down").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5"). The new key
    /// replaces every existing binding of the action, in each context the
    /// action was bound in.
    ///
    /// Returns warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts: Vec<Context> = Vec::new();
            for (ctx, _, a) in &self.bindings {
                if *a == action && !contexts.contains(ctx) {
                    contexts.push(*ctx);
                }
            }

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a given key in a given context.
    ///
    /// Tries the specific context first, then falls back to Global. The
    /// Confirm context never falls back: only its own keys answer a prompt.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        // Terminals report uppercase letters with SHIFT; the char already
        // carries the case.
        let modifiers = match code {
            KeyCode::Char(_) => modifiers - KeyModifiers::SHIFT,
            _ => modifiers,
        };
        let key = KeySpec::new(code, modifiers);

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        if matches!(context, Context::Global | Context::Confirm) {
            return None;
        }
        self.lookup.get(&(Context::Global, key)).copied()
    }

    /// Get all bindings for the help screen.
    ///
    /// Returns (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" | "navdown" | "down" => Some(Action::NavDown),
        "nav_up" | "navup" | "up" => Some(Action::NavUp),
        "cycle_focus" | "cyclefocus" | "focus" => Some(Action::CycleFocus),
        "back" => Some(Action::Back),
        "select" => Some(Action::Select),
        "refresh" | "reload" => Some(Action::Refresh),
        "toggle_favorite" | "togglefavorite" | "favorite" => Some(Action::ToggleFavorite),
        "open_link" | "openlink" | "open" => Some(Action::OpenLink),
        "move_item_up" | "moveitemup" | "move_up" => Some(Action::MoveItemUp),
        "move_item_down" | "moveitemdown" | "move_down" => Some(Action::MoveItemDown),
        "enter_search" | "entersearch" | "search" => Some(Action::EnterSearch),
        "exit_search" | "exitsearch" => Some(Action::ExitSearch),
        "commit_search" | "commitsearch" => Some(Action::CommitSearch),
        "toggle_dark_mode" | "toggledarkmode" | "dark_mode" | "theme" => {
            Some(Action::ToggleDarkMode)
        }
        "open_preferences" | "openpreferences" | "preferences" => Some(Action::OpenPreferences),
        "toggle_category" | "togglecategory" => Some(Action::ToggleCategory),
        "cycle_language" | "cyclelanguage" | "language" => Some(Action::CycleLanguage),
        "clear_favorites" | "clearfavorites" => Some(Action::ClearFavorites),
        "confirm" => Some(Action::Confirm),
        "cancel" => Some(Action::Cancel),
        "show_help" | "showhelp" | "help" => Some(Action::ShowHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(reg: &KeybindingRegistry, key: KeySpec, ctx: Context) -> Option<Action> {
        reg.action_for_key(key.code, key.modifiers, ctx)
    }

    #[test]
    fn test_default_registry_has_quit() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeySpec::ch('q'), Context::Global), Some(Action::Quit));
    }

    #[test]
    fn test_default_nav_keys() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeySpec::ch('j'), Context::Global), Some(Action::NavDown));
        assert_eq!(
            lookup(&reg, KeySpec::plain(KeyCode::Down), Context::Global),
            Some(Action::NavDown)
        );
        assert_eq!(lookup(&reg, KeySpec::ch('k'), Context::Global), Some(Action::NavUp));
        assert_eq!(
            lookup(&reg, KeySpec::plain(KeyCode::Up), Context::Global),
            Some(Action::NavUp)
        );
    }

    #[test]
    fn test_cards_context_falls_back_to_global() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeySpec::ch('j'), Context::Cards), Some(Action::NavDown));
        assert_eq!(lookup(&reg, KeySpec::ch('J'), Context::Cards), Some(Action::MoveItemDown));
        assert_eq!(lookup(&reg, KeySpec::ch('f'), Context::Cards), Some(Action::ToggleFavorite));
    }

    #[test]
    fn test_enter_depends_on_context() {
        let reg = KeybindingRegistry::new();
        let enter = KeySpec::plain(KeyCode::Enter);
        assert_eq!(lookup(&reg, enter, Context::Sidebar), Some(Action::Select));
        assert_eq!(lookup(&reg, enter, Context::Cards), Some(Action::OpenLink));
        assert_eq!(lookup(&reg, enter, Context::Search), Some(Action::CommitSearch));
        assert_eq!(lookup(&reg, enter, Context::Preferences), Some(Action::ToggleCategory));
        assert_eq!(lookup(&reg, enter, Context::Global), None);
    }

    #[test]
    fn test_card_keys_not_active_in_sidebar() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeySpec::ch('f'), Context::Sidebar), None);
        assert_eq!(lookup(&reg, KeySpec::ch('J'), Context::Sidebar), None);
    }

    #[test]
    fn test_confirm_does_not_fall_back() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeySpec::ch('y'), Context::Confirm), Some(Action::Confirm));
        assert_eq!(
            lookup(&reg, KeySpec::plain(KeyCode::Esc), Context::Confirm),
            Some(Action::Cancel)
        );
        assert_eq!(lookup(&reg, KeySpec::ch('q'), Context::Confirm), None);
    }

    #[test]
    fn test_search_context() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            lookup(&reg, KeySpec::plain(KeyCode::Esc), Context::Search),
            Some(Action::ExitSearch)
        );
    }

    #[test]
    fn test_shifted_letters_match() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('T'), KeyModifiers::SHIFT, Context::Cards),
            Some(Action::ToggleDarkMode)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('J'), KeyModifiers::SHIFT, Context::Cards),
            Some(Action::MoveItemDown)
        );
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeySpec::plain(KeyCode::F(12)), Context::Global), None);
    }

    #[test]
    fn test_apply_overrides_valid() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "Ctrl+q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert!(warnings.is_empty());
        assert_eq!(lookup(&reg, KeySpec::ch('q'), Context::Global), None);
        assert_eq!(lookup(&reg, KeySpec::ctrl('q'), Context::Global), Some(Action::Quit));
    }

    #[test]
    fn test_apply_overrides_unknown_action() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("nonexistent_action".to_string(), "q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Unknown action"));
    }

    #[test]
    fn test_apply_overrides_bad_key() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "Ctrl+Alt+Shift+Q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Cannot parse key"));
    }

    #[test]
    fn test_override_preserves_contexts_once() {
        let mut reg = KeybindingRegistry::new();
        // CycleLanguage is bound in Global ('L') and Preferences ('l')
        let mut overrides = HashMap::new();
        overrides.insert("language".to_string(), "F2".to_string());
        assert!(reg.apply_overrides(&overrides).is_empty());

        let f2 = KeySpec::plain(KeyCode::F(2));
        assert_eq!(lookup(&reg, f2, Context::Global), Some(Action::CycleLanguage));
        assert_eq!(lookup(&reg, f2, Context::Preferences), Some(Action::CycleLanguage));
        assert_eq!(lookup(&reg, KeySpec::ch('L'), Context::Global), None);

        let count = reg
            .all_bindings()
            .iter()
            .filter(|(_, _, a, _)| *a == Action::CycleLanguage)
            .count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_override_of_multi_key_action_leaves_one_binding() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("nav_down".to_string(), "n".to_string());
        reg.apply_overrides(&overrides);

        let count = reg
            .all_bindings()
            .iter()
            .filter(|(_, _, a, _)| *a == Action::NavDown)
            .count();
        assert_eq!(count, 1);
        assert_eq!(lookup(&reg, KeySpec::plain(KeyCode::Down), Context::Global), None);
    }

    #[test]
    fn test_parse_key_string_named_keys() {
        assert_eq!(parse_key_string("Enter"), Some(KeySpec::plain(KeyCode::Enter)));
        assert_eq!(parse_key_string("esc"), Some(KeySpec::plain(KeyCode::Esc)));
        assert_eq!(parse_key_string("space"), Some(KeySpec::ch(' ')));
    }

    #[test]
    fn test_parse_key_string_function_keys() {
        assert_eq!(parse_key_string("F1"), Some(KeySpec::plain(KeyCode::F(1))));
        assert_eq!(parse_key_string("f12"), Some(KeySpec::plain(KeyCode::F(12))));
        assert_eq!(parse_key_string("F0"), None);
        assert_eq!(parse_key_string("F13"), None);
        assert_eq!(parse_key_string("F"), Some(KeySpec::ch('F')));
    }

    #[test]
    fn test_parse_key_string_ctrl_and_chars() {
        assert_eq!(parse_key_string("Ctrl+d"), Some(KeySpec::ctrl('d')));
        assert_eq!(parse_key_string("/"), Some(KeySpec::ch('/')));
        assert_eq!(parse_key_string("é"), Some(KeySpec::ch('é')));
        assert_eq!(parse_key_string("abc"), None);
    }

    #[test]
    fn test_every_action_has_a_default_binding() {
        let reg = KeybindingRegistry::new();
        let bound: Vec<Action> = reg.all_bindings().into_iter().map(|(_, _, a, _)| a).collect();
        for action in [
            Action::Quit,
            Action::Refresh,
            Action::ToggleFavorite,
            Action::OpenLink,
            Action::MoveItemUp,
            Action::MoveItemDown,
            Action::ToggleDarkMode,
            Action::OpenPreferences,
            Action::ToggleCategory,
            Action::CycleLanguage,
            Action::ClearFavorites,
            Action::ShowHelp,
        ] {
            assert!(bound.contains(&action), "{:?} has no binding", action);
        }
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key(&KeySpec::ch('q')), "q");
        assert_eq!(format_key(&KeySpec::ch(' ')), "Space");
        assert_eq!(format_key(&KeySpec::ctrl('d')), "Ctrl+d");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::F(5))), "F5");
    }
}
