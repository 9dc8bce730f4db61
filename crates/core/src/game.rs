//! Game module - board, falling piece, score and run state
//!
//! This module ties the core components together. A [`Game`] is built eagerly
//! (the board exists from construction) and then driven entirely through its
//! operations:
//!
//! - lifecycle: [`Game::start_game`], [`Game::stop_game`]
//! - the timer tick: [`Game::advance`]
//! - player actions: moves, rotations, [`Game::set_fast_drop`], [`Game::cheat`]
//!
//! Player actions are silent no-ops while the game is stopped or when no piece
//! is falling. Rejected moves leave the game unchanged and report `false`.

use tracing::{debug, trace};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::piece::{rotate_op, translate_op, Piece};
use crate::rng::{PieceSource, UniformSource};
use crate::scoring::{apply_cheat_penalty, fall_step_score, row_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameStatus, Translation};

/// What a single [`Game::advance`] call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Game not running; nothing happened
    Idle,
    /// A new piece entered the board
    Spawned,
    /// The falling piece moved down one row
    Moved,
    /// The falling piece landed and became part of the board
    Settled { rows_cleared: usize },
    /// No room for a new piece; the game stopped
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game<S = UniformSource> {
    board: Board,
    cur_piece: Option<Piece>,
    score: u32,
    rem_cheats: u32,
    status: GameStatus,
    fast_fall: bool,
    config: EngineConfig,
    source: S,
}

impl Game<UniformSource> {
    /// Create a stopped game with an OS-seeded piece source
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_source(config, UniformSource::from_os_rng())
    }

    /// Create a stopped game whose piece sequence is fixed by `seed`
    pub fn seeded(config: EngineConfig, seed: u64) -> Result<Self, EngineError> {
        Self::with_source(config, UniformSource::seeded(seed))
    }
}

impl<S: PieceSource> Game<S> {
    /// Create a stopped game drawing pieces from `source`
    pub fn with_source(config: EngineConfig, source: S) -> Result<Self, EngineError> {
        config.validate()?;
        let board = Board::new(config.rows, config.cols)?;
        Ok(Self {
            board,
            cur_piece: None,
            score: 0,
            rem_cheats: config.max_cheats,
            status: GameStatus::Stopped,
            fast_fall: false,
            config,
            source,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cur_piece(&self) -> Option<&Piece> {
        self.cur_piece.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rem_cheats(&self) -> u32 {
        self.rem_cheats
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn fast_fall(&self) -> bool {
        self.fast_fall
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    /// Interval until the next advance, in milliseconds
    ///
    /// `None` while stopped: the host should not tick at all.
    pub fn tick_interval_ms(&self) -> Option<u32> {
        match (self.status, self.fast_fall) {
            (GameStatus::Stopped, _) => None,
            (GameStatus::Running, true) => Some(self.config.fast_tick_ms),
            (GameStatus::Running, false) => Some(self.config.tick_ms),
        }
    }

    fn reset_progress(&mut self) {
        self.cur_piece = None;
        self.board.reset();
        self.score = 0;
        self.rem_cheats = self.config.max_cheats;
        self.fast_fall = false;
    }

    /// Reset progress and run; restarts a running game
    pub fn start_game(&mut self) {
        self.reset_progress();
        self.status = GameStatus::Running;
        debug!(
            rows = self.board.nr_rows(),
            cols = self.board.nr_cols(),
            "game started"
        );
    }

    /// Stop the game, leaving board and falling piece in place
    pub fn stop_game(&mut self) {
        if self.is_running() {
            debug!(score = self.score, "game stopped");
        }
        self.status = GameStatus::Stopped;
        self.fast_fall = false;
    }

    /// Enable fast-drop; forced off unless the game is running
    pub fn set_fast_drop(&mut self, value: bool) {
        self.fast_fall = value && self.is_running();
    }

    /// Place a new piece, horizontally centered on the top rows
    ///
    /// Returns false when the piece does not fit (the board is full at the
    /// spawn position) or a piece is already falling.
    pub fn spawn_piece(&mut self) -> bool {
        if self.cur_piece.is_some() {
            return false;
        }

        let mut piece = Piece::new(self.source.next_kind());
        let width = piece.bounds().width();
        let col = (self.board.nr_cols() as i32 - width).div_euclid(2);
        piece.translate(Translation::new(0, col));

        if !self.board.check_piece(&piece) {
            return false;
        }

        trace!(kind = piece.kind().as_str(), col, "piece spawned");
        self.board.put_piece(&piece, Some(piece.kind()));
        self.cur_piece = Some(piece);
        true
    }

    /// Leave the falling piece on the board for good
    fn settle_current_piece(&mut self) {
        self.cur_piece = None;
    }

    fn move_current<F>(&mut self, transform: F) -> bool
    where
        F: FnOnce(&mut Piece),
    {
        if !self.is_running() {
            return false;
        }
        match self.cur_piece.as_mut() {
            Some(piece) => self.board.move_piece(piece, transform),
            None => false,
        }
    }

    /// Run one timer tick: spawn, fall one row, or settle
    pub fn advance(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        if self.cur_piece.is_none() {
            if self.spawn_piece() {
                return TickOutcome::Spawned;
            }
            debug!(score = self.score, "no room for a new piece, game over");
            self.stop_game();
            return TickOutcome::GameOver;
        }

        // A single collision test decides between falling and landing.
        if self.move_current(translate_op(Translation::DOWN)) {
            self.score = self
                .score
                .saturating_add(fall_step_score(self.fast_fall, &self.config));
            return TickOutcome::Moved;
        }

        self.settle_current_piece();
        let rows_cleared = self.board.remove_full_rows();
        self.score = self
            .score
            .saturating_add(row_clear_score(rows_cleared, &self.config));
        self.fast_fall = false;
        debug!(rows_cleared, score = self.score, "piece settled");
        TickOutcome::Settled { rows_cleared }
    }

    pub fn move_left(&mut self) -> bool {
        self.move_current(translate_op(Translation::LEFT))
    }

    pub fn move_right(&mut self) -> bool {
        self.move_current(translate_op(Translation::RIGHT))
    }

    /// Rotate counter-clockwise
    pub fn rotate_left(&mut self) -> bool {
        self.move_current(rotate_op(false))
    }

    /// Rotate clockwise
    pub fn rotate_right(&mut self) -> bool {
        self.move_current(rotate_op(true))
    }

    /// Remove the bottom row at a score penalty
    ///
    /// The falling piece keeps its coordinates; only settled blocks shift.
    /// An already-empty bottom row is rejected and costs nothing.
    pub fn cheat(&mut self) -> bool {
        if !self.is_running() || self.rem_cheats == 0 {
            return false;
        }

        if let Some(piece) = &self.cur_piece {
            self.board.put_piece(piece, None);
        }

        let removed = self.board.cheat();
        if removed {
            self.rem_cheats -= 1;
            self.score = apply_cheat_penalty(self.score, &self.config);
            debug!(rem_cheats = self.rem_cheats, score = self.score, "cheat used");
        } else {
            debug!("cheat rejected, bottom row already empty");
        }

        if let Some(piece) = &self.cur_piece {
            self.board.put_piece(piece, Some(piece.kind()));
        }
        removed
    }

    /// Write a read-only projection into `out`, reusing its buffers
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.board.nr_rows();
        out.cols = self.board.nr_cols();
        out.cells.clear();
        out.cells.extend(
            self.board
                .rows()
                .iter()
                .flatten()
                .map(|c| c.map(|k| k.color_index())),
        );
        out.score = self.score;
        out.status = self.status;
        out.rem_cheats = self.rem_cheats;
        out.fast_fall = self.fast_fall;
        out.active = self.cur_piece.as_ref().map(ActiveSnapshot::from);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;
    use crate::types::{Coord, PieceKind};

    fn game_with(rows: usize, cols: usize, kinds: Vec<PieceKind>) -> Game<SequenceSource> {
        Game::with_source(
            EngineConfig::with_dimensions(rows, cols),
            SequenceSource::new(kinds),
        )
        .unwrap()
    }

    fn fill_row_except(board: &mut Board, row: i32, gaps: &[i32]) {
        for col in 0..board.nr_cols() as i32 {
            if !gaps.contains(&col) {
                board.set(Coord::new(row, col), Some(PieceKind::I));
            }
        }
    }

    fn sorted_blocks(game: &Game<SequenceSource>) -> Vec<Coord> {
        let mut v = game.cur_piece().unwrap().blocks().to_vec();
        v.sort();
        v
    }

    #[test]
    fn test_new_game_is_stopped_with_board() {
        let game = game_with(20, 10, vec![PieceKind::T]);
        assert_eq!(game.status(), GameStatus::Stopped);
        assert_eq!(game.board().nr_rows(), 20);
        assert_eq!(game.board().nr_cols(), 10);
        assert!(game.cur_piece().is_none());
        assert_eq!(game.rem_cheats(), 3);
        assert_eq!(game.tick_interval_ms(), None);
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        let err = Game::seeded(EngineConfig::with_dimensions(0, 10), 1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDimension { .. }));
    }

    #[test]
    fn test_advance_spawns_centered() {
        let mut game = game_with(20, 10, vec![PieceKind::I, PieceKind::Square, PieceKind::T]);
        game.start_game();
        assert_eq!(game.advance(), TickOutcome::Spawned);
        assert_eq!(game.cur_piece().unwrap().bounds().left, 3);

        game.start_game();
        assert_eq!(game.advance(), TickOutcome::Spawned);
        assert_eq!(game.cur_piece().unwrap().bounds().left, 4);

        game.start_game();
        assert_eq!(game.advance(), TickOutcome::Spawned);
        let b = game.cur_piece().unwrap().bounds();
        assert_eq!((b.top, b.left), (0, 3));
    }

    #[test]
    fn test_advance_idle_when_stopped() {
        let mut game = game_with(20, 10, vec![PieceKind::T]);
        assert_eq!(game.advance(), TickOutcome::Idle);
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_fast_fall_scores_one_per_step() {
        let mut game = game_with(20, 10, vec![PieceKind::T]);
        game.start_game();
        game.advance();
        game.set_fast_drop(true);
        for _ in 0..3 {
            assert_eq!(game.advance(), TickOutcome::Moved);
        }
        assert_eq!(game.score(), 3);
    }

    #[test]
    fn test_slow_fall_scores_nothing() {
        let mut game = game_with(20, 10, vec![PieceKind::T]);
        game.start_game();
        game.advance();
        game.advance();
        game.advance();
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_score_saturates_at_max() {
        let mut game = game_with(6, 4, vec![PieceKind::Square]);
        game.start_game();
        fill_row_except(game.board_mut(), 5, &[1, 2]);
        game.advance();
        game.set_fast_drop(true);
        game.set_score(u32::MAX);

        assert_eq!(game.advance(), TickOutcome::Moved);
        assert_eq!(game.score(), u32::MAX);
        for _ in 0..3 {
            game.advance();
        }
        assert_eq!(game.advance(), TickOutcome::Settled { rows_cleared: 1 });
        assert_eq!(game.score(), u32::MAX);
    }

    #[test]
    fn test_landing_clears_two_rows() {
        let mut game = game_with(6, 4, vec![PieceKind::Square]);
        game.start_game();
        fill_row_except(game.board_mut(), 4, &[1, 2]);
        fill_row_except(game.board_mut(), 5, &[1, 2]);

        assert_eq!(game.advance(), TickOutcome::Spawned);
        game.set_fast_drop(true);
        for _ in 0..3 {
            assert_eq!(game.advance(), TickOutcome::Moved);
        }
        assert_eq!(game.score(), 3);
        assert_eq!(game.advance(), TickOutcome::Moved);
        assert_eq!(game.score(), 4);

        assert_eq!(game.advance(), TickOutcome::Settled { rows_cleared: 2 });
        assert_eq!(game.score(), 24);
        assert!(!game.fast_fall());
        assert!(game.cur_piece().is_none());
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_settle_without_clear_keeps_blocks() {
        let mut game = game_with(4, 4, vec![PieceKind::Square]);
        game.start_game();
        game.advance();
        game.advance();
        game.advance();
        assert_eq!(game.advance(), TickOutcome::Settled { rows_cleared: 0 });
        assert_eq!(game.board().get(Coord::new(3, 1)), Some(Some(PieceKind::Square)));
        assert_eq!(game.board().get(Coord::new(2, 2)), Some(Some(PieceKind::Square)));
    }

    #[test]
    fn test_start_always_restarts() {
        let mut game = game_with(20, 10, vec![PieceKind::T]);
        game.start_game();
        game.advance();
        game.set_fast_drop(true);
        game.advance();
        assert!(game.score() > 0);

        game.start_game();
        assert!(game.is_running());
        assert_eq!(game.score(), 0);
        assert!(game.cur_piece().is_none());
        assert!(!game.fast_fall());
        assert!(game.board().is_empty());
        assert_eq!(game.rem_cheats(), 3);
    }

    #[test]
    fn test_stop_freezes_board() {
        let mut game = game_with(20, 10, vec![PieceKind::T]);
        game.start_game();
        game.advance();
        game.set_fast_drop(true);
        game.stop_game();
        assert_eq!(game.status(), GameStatus::Stopped);
        assert!(!game.fast_fall());
        assert!(game.cur_piece().is_some());
        assert!(!game.board().is_empty());

        let before = game.board().clone();
        assert!(!game.move_left());
        assert!(!game.rotate_right());
        assert_eq!(game.advance(), TickOutcome::Idle);
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_set_fast_drop_requires_running() {
        let mut game = game_with(20, 10, vec![PieceKind::T]);
        game.set_fast_drop(true);
        assert!(!game.fast_fall());
        game.start_game();
        game.set_fast_drop(true);
        assert!(game.fast_fall());
        assert_eq!(game.tick_interval_ms(), Some(20));
        game.set_fast_drop(false);
        assert_eq!(game.tick_interval_ms(), Some(300));
        game.set_fast_drop(true);
        game.stop_game();
        assert!(!game.fast_fall());
    }

    #[test]
    fn test_moves_stop_at_walls() {
        let mut game = game_with(20, 10, vec![PieceKind::I]);
        game.start_game();
        game.advance();
        for _ in 0..3 {
            assert!(game.move_left());
        }
        assert!(!game.move_left());
        assert_eq!(game.cur_piece().unwrap().bounds().left, 0);
        for _ in 0..6 {
            assert!(game.move_right());
        }
        assert!(!game.move_right());
        assert_eq!(game.cur_piece().unwrap().bounds().right, 10);
    }

    #[test]
    fn test_rotation_rejected_near_floor() {
        // A horizontal I on the bottom row cannot turn vertical.
        let mut game = game_with(3, 10, vec![PieceKind::I]);
        game.start_game();
        game.advance();
        game.advance();
        game.advance();
        let before = sorted_blocks(&game);
        assert!(!game.rotate_right());
        assert!(!game.rotate_left());
        assert_eq!(sorted_blocks(&game), before);
    }

    #[test]
    fn test_rotation_moves_footprint() {
        let mut game = game_with(20, 10, vec![PieceKind::I]);
        game.start_game();
        game.advance();
        assert!(game.rotate_right());
        let blocks = sorted_blocks(&game);
        assert_eq!(
            blocks,
            vec![
                Coord::new(0, 3),
                Coord::new(1, 3),
                Coord::new(2, 3),
                Coord::new(3, 3)
            ]
        );
        let filled = game
            .board()
            .rows()
            .iter()
            .flatten()
            .filter(|c| c.is_some())
            .count();
        assert_eq!(filled, 4);
    }

    #[test]
    fn test_cheat_economy() {
        let mut game = game_with(10, 4, vec![PieceKind::Square]);
        game.start_game();
        game.set_score(15);
        game.board_mut().set(Coord::new(9, 0), Some(PieceKind::T));

        assert!(game.cheat());
        assert_eq!(game.rem_cheats(), 2);
        assert_eq!(game.score(), 5);
        assert!(game.board().is_empty());

        assert!(!game.cheat());
        assert_eq!(game.rem_cheats(), 2);
        assert_eq!(game.score(), 5);
    }

    #[test]
    fn test_cheat_keeps_falling_piece_in_place() {
        let mut game = game_with(10, 4, vec![PieceKind::Square]);
        game.start_game();
        fill_row_except(game.board_mut(), 9, &[0]);
        fill_row_except(game.board_mut(), 8, &[1, 2, 3]);
        game.advance();
        let before = sorted_blocks(&game);

        assert!(game.cheat());
        assert_eq!(sorted_blocks(&game), before);
        for &block in game.cur_piece().unwrap().blocks() {
            assert_eq!(game.board().get(block), Some(Some(PieceKind::Square)));
        }
        // Former row 8 is now the bottom row.
        assert_eq!(game.board().get(Coord::new(9, 0)), Some(Some(PieceKind::I)));
        assert!(game.board().is_row_empty(8));
    }

    #[test]
    fn test_cheat_limited() {
        let mut game = game_with(10, 4, vec![PieceKind::Square]);
        game.start_game();
        for row in 6..10 {
            game.board_mut().set(Coord::new(row, 0), Some(PieceKind::J));
        }
        assert!(game.cheat());
        assert!(game.cheat());
        assert!(game.cheat());
        assert_eq!(game.rem_cheats(), 0);
        assert!(!game.cheat());
        assert_eq!(game.board().get(Coord::new(9, 0)), Some(Some(PieceKind::J)));
    }

    #[test]
    fn test_cheat_ignored_when_stopped() {
        let mut game = game_with(10, 4, vec![PieceKind::Square]);
        game.board_mut().set(Coord::new(9, 0), Some(PieceKind::J));
        assert!(!game.cheat());
        assert_eq!(game.rem_cheats(), 3);
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        let mut game = game_with(4, 4, vec![PieceKind::Square]);
        game.start_game();
        let mut outcomes = Vec::new();
        for _ in 0..100 {
            let outcome = game.advance();
            outcomes.push(outcome);
            if outcome == TickOutcome::GameOver {
                break;
            }
        }
        assert_eq!(outcomes.last(), Some(&TickOutcome::GameOver));
        assert_eq!(game.status(), GameStatus::Stopped);
        assert!(game.cur_piece().is_none());
        assert_eq!(game.advance(), TickOutcome::Idle);
    }

    #[test]
    fn test_spawn_refuses_while_piece_falls() {
        let mut game = game_with(20, 10, vec![PieceKind::T]);
        game.start_game();
        assert!(game.spawn_piece());
        assert!(!game.spawn_piece());
    }

    #[test]
    fn test_snapshot_projection() {
        let mut game = game_with(5, 4, vec![PieceKind::I]);
        game.start_game();
        game.advance();
        let snap = game.snapshot();
        assert_eq!((snap.rows, snap.cols), (5, 4));
        assert_eq!(snap.cells.len(), 20);
        assert_eq!(&snap.cells[0..4], &[Some(1), Some(1), Some(1), Some(1)]);
        assert_eq!(snap.status, GameStatus::Running);
        assert_eq!(snap.rem_cheats, 3);
        let active = snap.active.unwrap();
        assert_eq!(active.color_index, 1);
        assert_eq!(active.blocks.len(), 4);
    }
}
