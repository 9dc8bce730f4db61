//! Action dispatch
//!
//! Maps every [`GameAction`] onto the matching [`Game`] operation. The return
//! value tells the host whether state changed, so it can skip a redraw.

use tracing::trace;

use crate::core::{Game, PieceSource, TickOutcome};
use crate::types::GameAction;

/// Apply one action; returns true if the game state changed
pub fn dispatch<S: PieceSource>(game: &mut Game<S>, action: GameAction) -> bool {
    let changed = match action {
        GameAction::StartGame => {
            game.start_game();
            true
        }
        GameAction::StopGame => {
            let was_running = game.is_running();
            game.stop_game();
            was_running
        }
        GameAction::MoveLeft => game.move_left(),
        GameAction::MoveRight => game.move_right(),
        GameAction::RotateLeft => game.rotate_left(),
        GameAction::RotateRight => game.rotate_right(),
        GameAction::Advance => game.advance() != TickOutcome::Idle,
        GameAction::Cheat => game.cheat(),
        GameAction::SetFastDrop(value) => {
            let before = game.fast_fall();
            game.set_fast_drop(value);
            before != game.fast_fall()
        }
    };
    trace!(action = action.as_str(), changed, "dispatched");
    changed
}

/// Apply actions in order; returns how many changed the state
pub fn dispatch_all<S, I>(game: &mut Game<S>, actions: I) -> usize
where
    S: PieceSource,
    I: IntoIterator<Item = GameAction>,
{
    actions
        .into_iter()
        .filter(|&action| dispatch(game, action))
        .count()
}
