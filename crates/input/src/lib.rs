//! Keyboard input module (engine-facing)
//!
//! Independent of any UI framework beyond `crossterm` key codes. Keys resolve
//! to [`InputAction`]s through rebindable [`KeyBindings`], and key-down,
//! key-up and click events map to [`crate::types::GameAction`]s that a host
//! hands to the engine.

pub mod bindings;
pub mod map;

pub use fallblock_types as types;

pub use bindings::{InputAction, KeyBindings};
pub use map::{handle_key_event, on_click, on_key_down, on_key_up, KeyResponse};
