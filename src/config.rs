//! Configuration file parser for ~/.config/contenthub/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are ignored by serde, though we log a warning when the file
//! contains potential typos.
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::content::{DEFAULT_FETCH_DELAY, DEFAULT_PAGE_SIZE};
use crate::state::PreferencesState;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// The preference fields only seed first-run defaults; preferences saved by
/// the app take precedence over them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Categories selected before the user has saved any preferences.
    pub default_categories: Vec<String>,

    /// Initial dark-mode flag.
    pub dark_mode: bool,

    /// Initial language code.
    pub language: String,

    /// Items per fetched page.
    pub page_size: usize,

    /// Simulated fetch latency of the mock source, in milliseconds.
    pub fetch_delay_ms: u64,

    /// Idle time before typed search text is applied, in milliseconds.
    pub search_debounce_ms: u64,

    /// Load the next page once the selection is this close to the end.
    pub load_more_threshold: usize,

    /// Custom keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        let prefs = PreferencesState::default();
        Self {
            default_categories: prefs.categories,
            dark_mode: prefs.dark_mode,
            language: prefs.language,
            page_size: DEFAULT_PAGE_SIZE,
            fetch_delay_ms: DEFAULT_FETCH_DELAY.as_millis() as u64,
            search_debounce_ms: 500,
            load_more_threshold: 3,
            keybindings: HashMap::new(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 8] = [
        "default_categories",
        "dark_mode",
        "language",
        "page_size",
        "fetch_delay_ms",
        "search_debounce_ms",
        "load_more_threshold",
        "keybindings",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        let config = config.sanitized();
        tracing::info!(
            path = %path.display(),
            page_size = config.page_size,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Replace values the app cannot work with by their defaults.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.page_size == 0 {
            tracing::warn!("page_size must be at least 1, using default");
            self.page_size = defaults.page_size;
        }
        if self.language.trim().is_empty() {
            tracing::warn!("language is empty, using default");
            self.language = defaults.language;
        }
        self
    }

    /// Preference values used when nothing has been saved yet.
    pub fn preference_defaults(&self) -> PreferencesState {
        PreferencesState {
            categories: self.default_categories.clone(),
            dark_mode: self.dark_mode,
            language: self.language.clone(),
        }
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

// ============================================================================
// Tests
// ============================================================================
