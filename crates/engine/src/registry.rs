//! Host-owned game registry
//!
//! One [`Game`] per session id. The registry owns nothing global: a host that
//! serves several players keeps one of these and routes actions by id.

use std::collections::hash_map::{Entry, HashMap};

use tracing::debug;

use crate::core::{EngineConfig, EngineError, Game, PieceSource, UniformSource};
use crate::dispatch::dispatch;
use crate::types::GameAction;

/// Session id used by hosts that only ever run one game
pub const DEFAULT_SESSION: &str = "";

/// Games keyed by session id, all built from one configuration
#[derive(Debug)]
pub struct GameRegistry<S = UniformSource> {
    config: EngineConfig,
    games: HashMap<String, Game<S>>,
}

impl<S: PieceSource> GameRegistry<S> {
    /// Create an empty registry; the configuration is validated once here
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            config,
            games: HashMap::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the game for `id`, creating it with a fresh source if absent
    pub fn get_or_create_with<F>(&mut self, id: &str, make_source: F) -> Result<&mut Game<S>, EngineError>
    where
        F: FnOnce() -> S,
    {
        match self.games.entry(id.to_owned()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let game = Game::with_source(self.config.clone(), make_source())?;
                debug!(id, "game created");
                Ok(entry.insert(game))
            }
        }
    }

    /// Get the game for `id`, creating it with a default source if absent
    pub fn get_or_create(&mut self, id: &str) -> Result<&mut Game<S>, EngineError>
    where
        S: Default,
    {
        self.get_or_create_with(id, S::default)
    }

    pub fn get(&self, id: &str) -> Option<&Game<S>> {
        self.games.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Game<S>> {
        self.games.get_mut(id)
    }

    /// Drop a game; returns it so the host can read the final state
    pub fn remove(&mut self, id: &str) -> Option<Game<S>> {
        let removed = self.games.remove(id);
        if removed.is_some() {
            debug!(id, "game removed");
        }
        removed
    }

    /// Route an action to the game for `id`
    ///
    /// `None` if no such game exists, otherwise whether the state changed.
    pub fn dispatch(&mut self, id: &str, action: GameAction) -> Option<bool> {
        self.games.get_mut(id).map(|game| dispatch(game, action))
    }

    /// Session ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.games.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceSource;
    use crate::types::{GameStatus, PieceKind};

    fn registry() -> GameRegistry<SequenceSource> {
        GameRegistry::new(EngineConfig::with_dimensions(12, 6)).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = GameRegistry::<SequenceSource>::new(EngineConfig::with_dimensions(0, 6));
        assert!(matches!(result, Err(EngineError::InvalidDimension { .. })));
    }

    #[test]
    fn test_games_are_independent() {
        let mut reg = registry();
        reg.get_or_create_with("alice", || SequenceSource::repeat(PieceKind::I))
            .unwrap();
        reg.get_or_create_with("bob", || SequenceSource::repeat(PieceKind::Square))
            .unwrap();

        assert_eq!(reg.dispatch("alice", GameAction::StartGame), Some(true));
        assert_eq!(reg.dispatch("alice", GameAction::Advance), Some(true));

        let alice = reg.get("alice").unwrap();
        assert_eq!(alice.status(), GameStatus::Running);
        assert_eq!(alice.cur_piece().map(|p| p.kind()), Some(PieceKind::I));

        let bob = reg.get("bob").unwrap();
        assert_eq!(bob.status(), GameStatus::Stopped);
        assert!(bob.board().is_empty());
        assert_eq!(reg.ids(), vec!["alice", "bob"]);
    }

    #[test]
    fn test_existing_game_is_reused() {
        let mut reg = registry();
        reg.get_or_create_with("p1", || SequenceSource::repeat(PieceKind::T))
            .unwrap()
            .start_game();
        let again = reg
            .get_or_create_with("p1", || panic!("source factory must not run twice"))
            .unwrap();
        assert!(again.is_running());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_default_session() {
        let mut reg = registry();
        reg.get_or_create_with(DEFAULT_SESSION, || SequenceSource::repeat(PieceKind::L))
            .unwrap();
        assert_eq!(reg.dispatch(DEFAULT_SESSION, GameAction::StartGame), Some(true));
        assert_eq!(reg.ids(), vec![""]);
    }

    #[test]
    fn test_unknown_id() {
        let mut reg = registry();
        assert_eq!(reg.dispatch("ghost", GameAction::StartGame), None);
        assert!(reg.get_mut("ghost").is_none());
        assert!(reg.remove("ghost").is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_remove_returns_final_state() {
        let mut reg = registry();
        reg.get_or_create_with("p1", || SequenceSource::repeat(PieceKind::T))
            .unwrap();
        reg.dispatch("p1", GameAction::StartGame);
        let game = reg.remove("p1").unwrap();
        assert!(game.is_running());
        assert!(reg.get("p1").is_none());
    }
}
