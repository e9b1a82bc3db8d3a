//! ContentHub: a terminal dashboard of paginated news, movie and social
//! cards with persisted favorites and preferences.

pub mod app;
pub mod config;
pub mod content;
pub mod feed;
pub mod keybindings;
pub mod logging;
pub mod state;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod util;
