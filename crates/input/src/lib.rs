//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. There is no
//! key-repeat handling here: the terminal's own auto-repeat produces repeated
//! presses and each one becomes one command.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
