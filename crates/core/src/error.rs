//! Engine errors
//!
//! Only construction-time misuse is an error. Rejected moves, actions issued
//! while stopped and failed spawns are ordinary outcomes reported as `bool` or
//! [`crate::TickOutcome`].

/// Errors raised while building a board or game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid board dimension: {rows} rows x {cols} cols (both must be positive)")]
    InvalidDimension { rows: i64, cols: i64 },

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}
