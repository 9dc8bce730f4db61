//! Read-only projections of a game for presentation layers

use serde::{Deserialize, Serialize};

use crate::piece::Piece;
use crate::types::{Coord, GameStatus, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color_index: u8,
    pub blocks: Vec<Coord>,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind(),
            color_index: value.color_index(),
            blocks: value.blocks().to_vec(),
        }
    }
}

/// Everything a renderer needs, detached from the live game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major color indices, `None` for empty cells
    pub cells: Vec<Option<u8>>,
    pub score: u32,
    pub status: GameStatus,
    pub rem_cheats: u32,
    pub fast_fall: bool,
    pub active: Option<ActiveSnapshot>,
}

impl GameSnapshot {
    /// Cell at `(row, col)`, `None` when out of range
    pub fn cell(&self, row: usize, col: usize) -> Option<Option<u8>> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// Iterate rows as slices
    pub fn row_slices(&self) -> impl Iterator<Item = &[Option<u8>]> {
        self.cells.chunks(self.cols.max(1))
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Running
    }
}
