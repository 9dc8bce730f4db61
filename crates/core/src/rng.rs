//! Piece sources - where the next falling piece comes from
//!
//! The game asks its source for a kind every time it spawns. Two sources ship:
//!
//! - [`UniformSource`]: each of the seven kinds with equal probability, backed
//!   by a seedable `StdRng`
//! - [`SequenceSource`]: a fixed, repeating list of kinds for tests and
//!   replays

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{PieceKind, PIECE_KIND_COUNT};

/// Supplies the kind of each newly spawned piece
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Uniform random piece selection
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: StdRng,
}

impl UniformSource {
    /// Reproducible source for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for UniformSource {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.random_range(0..PIECE_KIND_COUNT)]
    }
}

/// Cycles through a fixed list of kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSource {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequenceSource {
    /// Create a source repeating `kinds`; an empty list falls back to all
    /// seven kinds in color-index order.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds = PieceKind::ALL.to_vec();
        }
        Self { kinds, index: 0 }
    }

    /// Always the same kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }

    /// Peek at the kind the next spawn will get
    pub fn peek(&self) -> PieceKind {
        self.kinds[self.index]
    }
}

impl PieceSource for SequenceSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}
