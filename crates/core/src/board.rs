//! Board module - manages the game grid
//!
//! The board is a list of rows, each holding exactly `nr_cols` cells. Keeping
//! rows separate (instead of a flat array) makes row removal a plain `Vec`
//! splice, which is what line clears and cheats do.
//!
//! Coordinates: `(row, col)` with row 0 at the top. Dimensions are fixed when
//! the board is created.

use std::fmt;

use crate::error::EngineError;
use crate::piece::Piece;
use crate::types::{Cell, Coord};

/// Largest row or column count; coordinates are `i32`
pub const MAX_DIMENSION: usize = i32::MAX as usize;

/// Reject sizes that are zero or too large to address with a [`Coord`]
pub fn check_dimensions(nr_rows: usize, nr_cols: usize) -> Result<(), EngineError> {
    let fits = |n: usize| (1..=MAX_DIMENSION).contains(&n);
    if fits(nr_rows) && fits(nr_cols) {
        return Ok(());
    }
    Err(EngineError::InvalidDimension {
        rows: i64::try_from(nr_rows).unwrap_or(i64::MAX),
        cols: i64::try_from(nr_cols).unwrap_or(i64::MAX),
    })
}

/// One horizontal line of cells
pub type Row = Vec<Cell>;

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: Vec<Row>,
    nr_cols: usize,
}

impl Board {
    /// Create an empty board
    ///
    /// Fails with [`EngineError::InvalidDimension`] if either size is zero or
    /// does not fit a signed 32-bit coordinate.
    pub fn new(nr_rows: usize, nr_cols: usize) -> Result<Self, EngineError> {
        check_dimensions(nr_rows, nr_cols)?;
        Ok(Self {
            rows: vec![vec![None; nr_cols]; nr_rows],
            nr_cols,
        })
    }

    /// Create an empty board from signed sizes (e.g. straight from user input)
    pub fn try_from_dimensions(nr_rows: i64, nr_cols: i64) -> Result<Self, EngineError> {
        if nr_rows <= 0 || nr_cols <= 0 {
            return Err(EngineError::InvalidDimension {
                rows: nr_rows,
                cols: nr_cols,
            });
        }
        Self::new(nr_rows as usize, nr_cols as usize)
    }

    /// Build a board from explicit rows (all rows must share one non-zero width)
    pub fn from_rows(rows: Vec<Row>) -> Result<Self, EngineError> {
        let nr_cols = rows.first().map_or(0, Vec::len);
        check_dimensions(rows.len(), nr_cols)?;
        if rows.iter().any(|r| r.len() != nr_cols) {
            return Err(EngineError::InvalidDimension {
                rows: rows.len() as i64,
                cols: nr_cols as i64,
            });
        }
        Ok(Self { rows, nr_cols })
    }

    fn empty_row(&self) -> Row {
        vec![None; self.nr_cols]
    }

    pub fn nr_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn nr_cols(&self) -> usize {
        self.nr_cols
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Calculate `(row, col)` indices, `None` when off the board
    #[inline(always)]
    fn index(&self, pos: Coord) -> Option<(usize, usize)> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }
        let (row, col) = (pos.row as usize, pos.col as usize);
        (row < self.rows.len() && col < self.nr_cols).then_some((row, col))
    }

    /// Get the cell at `pos`, `None` if out of bounds
    pub fn get(&self, pos: Coord) -> Option<Cell> {
        self.index(pos).map(|(r, c)| self.rows[r][c])
    }

    /// Set the cell at `pos`; returns false if out of bounds
    pub fn set(&mut self, pos: Coord, cell: Cell) -> bool {
        match self.index(pos) {
            Some((r, c)) => {
                self.rows[r][c] = cell;
                true
            }
            None => false,
        }
    }

    /// Empty every cell, keeping the dimensions
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.fill(None);
        }
    }

    /// Write `value` into every cell covered by `piece`
    pub fn put_piece(&mut self, piece: &Piece, value: Cell) {
        for &block in piece.blocks() {
            self.set(block, value);
        }
    }

    /// Write `values[i]` into the cell of block `i`
    pub fn put_piece_each(&mut self, piece: &Piece, values: &[Cell]) {
        debug_assert_eq!(piece.blocks().len(), values.len());
        for (&block, &value) in piece.blocks().iter().zip(values) {
            self.set(block, value);
        }
    }

    /// Check that every block is on the board and on an empty cell
    pub fn check_piece(&self, piece: &Piece) -> bool {
        piece
            .blocks()
            .iter()
            .all(|&block| matches!(self.get(block), Some(None)))
    }

    /// Try to move a piece that is currently placed on the board
    ///
    /// The piece is lifted off the board, a clone is transformed and checked.
    /// On collision the piece goes back where it was and `false` is returned;
    /// otherwise the clone is placed and its blocks are copied into `piece`.
    pub fn move_piece<F>(&mut self, piece: &mut Piece, transform: F) -> bool
    where
        F: FnOnce(&mut Piece),
    {
        self.put_piece(piece, None);

        let mut moved = piece.clone();
        transform(&mut moved);

        if !self.check_piece(&moved) {
            self.put_piece(piece, Some(piece.kind()));
            return false;
        }

        self.put_piece(&moved, Some(moved.kind()));
        piece.take_blocks_from(&moved);
        true
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows.get(row).is_some_and(|r| row_is_full(r))
    }

    /// Check if a row has no filled cell
    pub fn is_row_empty(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|r| r.iter().all(Option::is_none))
    }

    /// Check if no cell on the board is filled
    pub fn is_empty(&self) -> bool {
        (0..self.rows.len()).all(|r| self.is_row_empty(r))
    }

    /// Delete one row and push an empty row in at the top
    ///
    /// Out-of-range indices are ignored.
    pub fn remove_row(&mut self, row: usize) {
        if row < self.rows.len() {
            self.rows.remove(row);
            let empty = self.empty_row();
            self.rows.insert(0, empty);
        }
    }

    /// Remove every full row, refilling from the top
    ///
    /// Remaining rows keep their relative order. Returns the number of rows
    /// removed.
    pub fn remove_full_rows(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !row_is_full(row));
        let removed = before - self.rows.len();

        if removed > 0 {
            let nr_cols = self.nr_cols;
            self.rows
                .splice(0..0, std::iter::repeat_with(|| vec![None; nr_cols]).take(removed));
        }
        removed
    }

    /// Remove the bottom row if it holds at least one block
    ///
    /// Any falling piece must be lifted off the board beforehand.
    pub fn cheat(&mut self) -> bool {
        let bottom = self.rows.len() - 1;
        if self.is_row_empty(bottom) {
            return false;
        }
        self.remove_row(bottom);
        true
    }

    /// Row-list view of color indices
    pub fn color_rows(&self) -> Vec<Vec<Option<u8>>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.map(|k| k.color_index())).collect())
            .collect()
    }

    /// Row-major view of color indices
    pub fn color_cells(&self) -> Vec<Option<u8>> {
        self.rows
            .iter()
            .flatten()
            .map(|c| c.map(|k| k.color_index()))
            .collect()
    }
}

fn row_is_full(row: &[Cell]) -> bool {
    row.iter().all(Option::is_some)
}

/// Text rendering: `.` for empty cells, the color index digit otherwise.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                match cell {
                    Some(kind) => write!(f, "{}", kind.color_index())?,
                    None => f.write_str(".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(20, 10).unwrap();
        assert_eq!(board.index(Coord::new(0, 0)), Some((0, 0)));
        assert_eq!(board.index(Coord::new(19, 9)), Some((19, 9)));
        assert_eq!(board.index(Coord::new(-1, 0)), None);
        assert_eq!(board.index(Coord::new(0, 10)), None);
        assert_eq!(board.index(Coord::new(20, 0)), None);
    }

    #[test]
    fn test_signed_dimensions_rejected() {
        assert_eq!(
            Board::try_from_dimensions(-3, 10),
            Err(EngineError::InvalidDimension { rows: -3, cols: 10 })
        );
        assert!(Board::try_from_dimensions(4, 0).is_err());
        assert!(Board::try_from_dimensions(4, 2).is_ok());
    }

    #[test]
    fn test_from_rows_requires_uniform_width() {
        let ragged = vec![vec![None; 3], vec![None; 2]];
        assert!(Board::from_rows(ragged).is_err());
        assert!(Board::from_rows(Vec::new()).is_err());
        let ok = Board::from_rows(vec![vec![None; 3]; 2]).unwrap();
        assert_eq!((ok.nr_rows(), ok.nr_cols()), (2, 3));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let too_wide = MAX_DIMENSION + 1;
        assert_eq!(
            Board::new(4, too_wide),
            Err(EngineError::InvalidDimension {
                rows: 4,
                cols: too_wide as i64
            })
        );
        assert!(Board::new(too_wide, 4).is_err());
        assert!(check_dimensions(MAX_DIMENSION, 1).is_ok());
    }

    #[test]
    fn test_row_full_and_empty() {
        let mut board = Board::new(3, 2).unwrap();
        board.set(Coord::new(1, 0), Some(PieceKind::I));
        board.set(Coord::new(2, 0), Some(PieceKind::I));
        board.set(Coord::new(2, 1), Some(PieceKind::J));
        assert!(!board.is_row_full(0) && board.is_row_empty(0));
        assert!(!board.is_row_full(1) && !board.is_row_empty(1));
        assert!(board.is_row_full(2));
        assert!(!board.is_row_full(3), "out of range is never full");

        assert_eq!(board.remove_full_rows(), 1);
        assert!(!board.is_row_full(2));
        assert_eq!(board.get(Coord::new(2, 0)), Some(Some(PieceKind::I)));
    }

    #[test]
    fn test_put_piece_each_restores_mixed_cells() {
        let mut board = Board::new(4, 4).unwrap();
        let piece = Piece::new(PieceKind::Square);
        board.put_piece(&piece, Some(PieceKind::T));
        board.put_piece_each(&piece, &[None, Some(PieceKind::I), None, Some(PieceKind::J)]);
        assert_eq!(board.get(Coord::new(0, 0)), Some(None));
        assert_eq!(board.get(Coord::new(0, 1)), Some(Some(PieceKind::I)));
        assert_eq!(board.get(Coord::new(1, 1)), Some(Some(PieceKind::J)));
    }

    #[test]
    fn test_display_renders_color_indices() {
        let mut board = Board::new(2, 3).unwrap();
        board.set(Coord::new(1, 0), Some(PieceKind::T));
        assert_eq!(board.to_string(), "...\n6..\n");
    }

    #[test]
    fn test_color_cells_row_major() {
        let mut board = Board::new(2, 2).unwrap();
        board.set(Coord::new(1, 1), Some(PieceKind::I));
        assert_eq!(board.color_cells(), vec![None, None, None, Some(1)]);
    }
}
