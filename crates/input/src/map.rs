//! Key mapping from terminal events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::bindings::{InputAction, KeyBindings};
use crate::types::GameAction;

/// How a host should treat a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    /// Not ours; let the host handle it
    Ignored,
    /// Handled, but there is nothing to dispatch
    Swallowed,
    Action(GameAction),
}

impl KeyResponse {
    pub fn action(self) -> Option<GameAction> {
        match self {
            KeyResponse::Action(action) => Some(action),
            _ => None,
        }
    }

    /// Whether the host should suppress its default handling
    pub fn is_handled(self) -> bool {
        !matches!(self, KeyResponse::Ignored)
    }
}

/// Map a key press
pub fn on_key_down(bindings: &KeyBindings, code: KeyCode) -> KeyResponse {
    let action = match bindings.resolve(code) {
        Some(InputAction::StartGame) => GameAction::StartGame,
        Some(InputAction::StopGame) => GameAction::StopGame,
        Some(InputAction::FastDrop) => GameAction::SetFastDrop(true),
        Some(InputAction::MoveLeft) => GameAction::MoveLeft,
        Some(InputAction::MoveRight) => GameAction::MoveRight,
        Some(InputAction::RotateLeft) => GameAction::RotateLeft,
        Some(InputAction::RotateRight) => GameAction::RotateRight,
        Some(InputAction::Cheat) => GameAction::Cheat,
        None if bindings.is_swallowed(code) => return KeyResponse::Swallowed,
        None => return KeyResponse::Ignored,
    };
    KeyResponse::Action(action)
}

/// Map a key release; only the fast-drop key reacts
pub fn on_key_up(bindings: &KeyBindings, code: KeyCode) -> KeyResponse {
    match bindings.resolve(code) {
        Some(InputAction::FastDrop) => KeyResponse::Action(GameAction::SetFastDrop(false)),
        _ => KeyResponse::Ignored,
    }
}

/// Clicking the board starts a game
pub fn on_click() -> GameAction {
    GameAction::StartGame
}

/// Map a crossterm key event by its kind
///
/// Terminals without release events never produce `Release`; hosts there
/// should send `SetFastDrop(false)` on their own.
pub fn handle_key_event(bindings: &KeyBindings, key: KeyEvent) -> KeyResponse {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => on_key_down(bindings, key.code),
        KeyEventKind::Release => on_key_up(bindings, key.code),
    }
}
