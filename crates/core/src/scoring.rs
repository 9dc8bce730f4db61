//! Scoring module - the three ways the score changes
//!
//! - settling a piece pays `row_clear_points` per removed row
//! - a successful downward step in fast-fall mode pays `fast_fall_points`
//! - a successful cheat costs `cheat_penalty`, never taking the score below 0

use crate::config::EngineConfig;

/// Points for removing `rows` full rows at once
pub fn row_clear_score(rows: usize, config: &EngineConfig) -> u32 {
    (rows as u32).saturating_mul(config.row_clear_points)
}

/// Points for one advance step, 0 unless fast-falling
pub fn fall_step_score(fast_fall: bool, config: &EngineConfig) -> u32 {
    if fast_fall {
        config.fast_fall_points
    } else {
        0
    }
}

/// Score after paying for a cheat
pub fn apply_cheat_penalty(score: u32, config: &EngineConfig) -> u32 {
    score.saturating_sub(config.cheat_penalty)
}
