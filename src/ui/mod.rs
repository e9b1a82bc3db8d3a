//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background fetch results
//! - `render` - Layout and overlays
//! - `helpers` - Fetch spawning and link opening
//! - `header`, `sidebar`, `cards`, `status`, `help` - Widgets

mod cards;
mod events;
mod header;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod render;
mod sidebar;
mod status;

pub use loop_runner::{run, Action};
