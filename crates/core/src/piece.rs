//! Pieces module - tetromino templates and in-place piece geometry
//!
//! A piece is an ordered list of block coordinates plus the kind (color index)
//! that produced it. Block order matters: [`crate::Board::move_piece`] copies a
//! transformed clone back index-for-index.
//!
//! Bounds are cached lazily. The cache is shifted by [`Piece::translate`],
//! dropped by [`Piece::rotate`], and never copied by `clone`.

use std::cell::Cell as Memo;

use arrayvec::ArrayVec;
use rand::Rng;

use crate::types::{Bounds, Coord, PieceKind, Translation, PIECE_KIND_COUNT};

/// Upper bound on blocks per piece (all templates are tetrominoes)
pub const MAX_BLOCKS: usize = 4;

/// Block coordinates of a piece
pub type Blocks = ArrayVec<Coord, MAX_BLOCKS>;

/// Shape templates as `(row, col)` pairs, top-left aligned, in color-index order.
const TEMPLATES: [[(i32, i32); 4]; PIECE_KIND_COUNT] = [
    // Square
    [(0, 0), (0, 1), (1, 0), (1, 1)],
    // I
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    // L
    [(0, 0), (0, 1), (0, 2), (1, 0)],
    // J
    [(0, 0), (0, 1), (0, 2), (1, 2)],
    // Z ("2"-shape)
    [(0, 0), (0, 1), (1, 1), (1, 2)],
    // S
    [(0, 1), (0, 2), (1, 0), (1, 1)],
    // T
    [(0, 0), (0, 1), (0, 2), (1, 1)],
];

/// Template blocks for a kind
pub fn template(kind: PieceKind) -> Blocks {
    TEMPLATES[kind.color_index() as usize]
        .iter()
        .map(|&(row, col)| Coord::new(row, col))
        .collect()
}

/// A falling piece
#[derive(Debug)]
pub struct Piece {
    blocks: Blocks,
    kind: PieceKind,
    bounds: Memo<Option<Bounds>>,
}

impl Piece {
    /// Create a piece from its template, at the board origin
    pub fn new(kind: PieceKind) -> Self {
        Self {
            blocks: template(kind),
            kind,
            bounds: Memo::new(None),
        }
    }

    /// Pick one of the seven templates uniformly at random
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let index = rng.random_range(0..PIECE_KIND_COUNT);
        Self::new(PieceKind::ALL[index])
    }

    /// Build a piece from explicit blocks
    ///
    /// Returns `None` for an empty block list or more than [`MAX_BLOCKS`] blocks.
    pub fn from_blocks(kind: PieceKind, blocks: &[Coord]) -> Option<Self> {
        if blocks.is_empty() || blocks.len() > MAX_BLOCKS {
            return None;
        }
        Some(Self {
            blocks: blocks.iter().copied().collect(),
            kind,
            bounds: Memo::new(None),
        })
    }

    pub fn blocks(&self) -> &[Coord] {
        &self.blocks
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color_index(&self) -> u8 {
        self.kind.color_index()
    }

    /// Bounding box, computed on first use and cached
    pub fn bounds(&self) -> Bounds {
        if let Some(bounds) = self.bounds.get() {
            return bounds;
        }
        let bounds = self.blocks.iter().fold(
            Bounds {
                top: i32::MAX,
                left: i32::MAX,
                bottom: i32::MIN,
                right: i32::MIN,
            },
            |acc, b| Bounds {
                top: acc.top.min(b.row),
                left: acc.left.min(b.col),
                bottom: acc.bottom.max(b.row + 1),
                right: acc.right.max(b.col + 1),
            },
        );
        self.bounds.set(Some(bounds));
        bounds
    }

    /// Move every block by `by`; a cached bounding box moves with it
    pub fn translate(&mut self, by: Translation) {
        for block in &mut self.blocks {
            block.row += by.rows;
            block.col += by.cols;
        }
        if let Some(bounds) = self.bounds.get() {
            self.bounds.set(Some(bounds.translated(by)));
        }
    }

    /// Rotate a quarter turn about the piece's own bounding box
    ///
    /// The rotated shape keeps the original top-left corner. Clockwise maps
    /// `(row, col)` to `(col, -row)`, counter-clockwise to `(-col, row)`; the
    /// two are inverses. Never fails: the caller checks the result against
    /// the board.
    pub fn rotate(&mut self, clockwise: bool) {
        let origin = self.bounds();
        self.bounds.set(None);
        self.translate(Translation::new(-origin.top, -origin.left));

        for block in &mut self.blocks {
            let Coord { row, col } = *block;
            *block = if clockwise {
                Coord::new(col, -row)
            } else {
                Coord::new(-col, row)
            };
        }

        let rotated = self.bounds();
        self.translate(Translation::new(
            origin.top - rotated.top,
            origin.left - rotated.left,
        ));
    }

    /// Overwrite this piece's blocks with `other`'s, index-for-index
    pub(crate) fn take_blocks_from(&mut self, other: &Piece) {
        debug_assert_eq!(self.blocks.len(), other.blocks.len());
        for (mine, theirs) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            *mine = *theirs;
        }
        self.bounds.set(other.bounds.get());
    }
}

impl Clone for Piece {
    fn clone(&self) -> Self {
        Self {
            blocks: self.blocks.clone(),
            kind: self.kind,
            bounds: Memo::new(None),
        }
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.blocks == other.blocks
    }
}

impl Eq for Piece {}

/// Transform that translates a piece, for [`crate::Board::move_piece`]
pub fn translate_op(by: Translation) -> impl FnOnce(&mut Piece) {
    move |piece| piece.translate(by)
}

/// Transform that rotates a piece, for [`crate::Board::move_piece`]
pub fn rotate_op(clockwise: bool) -> impl FnOnce(&mut Piece) {
    move |piece| piece.rotate(clockwise)
}
