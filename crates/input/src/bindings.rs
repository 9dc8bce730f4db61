//! Rebindable key table

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

/// Keys per action
pub const MAX_KEYS_PER_ACTION: usize = 4;

/// Keys bound to one action
pub type Keys = ArrayVec<KeyCode, MAX_KEYS_PER_ACTION>;

/// What a key means to the player, before it becomes a game action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    StartGame,
    StopGame,
    FastDrop,
    MoveLeft,
    MoveRight,
    RotateLeft,
    RotateRight,
    Cheat,
}

impl InputAction {
    pub const ALL: [InputAction; 8] = [
        InputAction::StartGame,
        InputAction::StopGame,
        InputAction::FastDrop,
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::RotateLeft,
        InputAction::RotateRight,
        InputAction::Cheat,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// Key table: each action owns up to [`MAX_KEYS_PER_ACTION`] keys
///
/// Swallowed keys map to no action but are still reported as handled, so a
/// host can keep them from scrolling the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    keys: [Keys; InputAction::ALL.len()],
    swallowed: Keys,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            keys: Default::default(),
            swallowed: Keys::new(),
        };
        bindings.bind(InputAction::StartGame, &[KeyCode::Char(' ')]);
        bindings.bind(InputAction::StopGame, &[KeyCode::Esc]);
        bindings.bind(InputAction::FastDrop, &[KeyCode::Down]);
        bindings.bind(InputAction::MoveLeft, &[KeyCode::Left]);
        bindings.bind(InputAction::MoveRight, &[KeyCode::Right]);
        bindings.bind(
            InputAction::RotateLeft,
            &[KeyCode::Char('z'), KeyCode::Char('Z')],
        );
        bindings.bind(
            InputAction::RotateRight,
            &[KeyCode::Char('x'), KeyCode::Char('X')],
        );
        bindings.bind(InputAction::Cheat, &[KeyCode::Char('a'), KeyCode::Char('A')]);
        bindings.swallowed.push(KeyCode::Up);
        bindings
    }
}

impl KeyBindings {
    /// A table with nothing bound
    pub fn empty() -> Self {
        Self {
            keys: Default::default(),
            swallowed: Keys::new(),
        }
    }

    /// Action bound to `code`, if any
    pub fn resolve(&self, code: KeyCode) -> Option<InputAction> {
        InputAction::ALL
            .into_iter()
            .find(|action| self.keys[action.slot()].contains(&code))
    }

    /// Replace the keys of `action`
    ///
    /// A key already bound to another action moves to this one. Keys past
    /// [`MAX_KEYS_PER_ACTION`] are ignored.
    pub fn bind(&mut self, action: InputAction, keys: &[KeyCode]) {
        for slot in &mut self.keys {
            slot.retain(|k| !keys.contains(k));
        }
        self.swallowed.retain(|k| !keys.contains(k));

        let slot = &mut self.keys[action.slot()];
        slot.clear();
        for &key in keys.iter().take(MAX_KEYS_PER_ACTION) {
            if !slot.contains(&key) {
                slot.push(key);
            }
        }
    }

    pub fn keys(&self, action: InputAction) -> &[KeyCode] {
        &self.keys[action.slot()]
    }

    /// Whether `code` is handled without producing an action
    pub fn is_swallowed(&self, code: KeyCode) -> bool {
        self.swallowed.contains(&code)
    }
}
