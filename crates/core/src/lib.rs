//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule. It has **no dependencies** on UI, timers,
//! or I/O: each operation is a bounded, synchronous state transition on a
//! small grid.
//!
//! # Module Structure
//!
//! - [`piece`]: the seven templates, bounds, translation and rotation
//! - [`board`]: the cell grid, collision checks, moves with rollback, row removal
//! - [`game`]: falling piece, score, cheats, fast-fall and the run state
//! - [`rng`]: piece sources (uniform random or a fixed sequence)
//! - [`scoring`]: row-clear, fast-fall and cheat scoring
//! - [`config`] / [`error`]: construction-time settings and their errors
//! - [`snapshot`]: read-only projections for renderers
//!
//! # Game Rules
//!
//! - Each tick either spawns a piece at the top center, moves the falling piece
//!   down one row, or settles it and removes full rows
//! - A spawn that does not fit ends the game
//! - Fast-fall steps pay 1 point, each removed row pays 10
//! - Three cheats per game: each removes a non-empty bottom row for 10 points
//!
//! # Example
//!
//! ```
//! use fallblock_core::{EngineConfig, Game, TickOutcome};
//!
//! let mut game = Game::seeded(EngineConfig::with_dimensions(20, 10), 12345).unwrap();
//! game.start_game();
//!
//! assert_eq!(game.advance(), TickOutcome::Spawned);
//! game.move_left();
//! game.rotate_right();
//! game.set_fast_drop(true);
//! assert_eq!(game.advance(), TickOutcome::Moved);
//! assert_eq!(game.score(), 1);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use fallblock_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Row};
pub use config::EngineConfig;
pub use error::EngineError;
pub use game::{Game, TickOutcome};
pub use piece::{rotate_op, translate_op, Piece};
pub use rng::{PieceSource, SequenceSource, UniformSource};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
