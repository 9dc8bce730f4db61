//! Engine configuration
//!
//! All values are fixed for the lifetime of a game. They can be deserialized
//! (every field defaults), read from `FALLBLOCK_*` environment variables, or
//! built in code.

use serde::{Deserialize, Serialize};

use crate::board::check_dimensions;
use crate::error::EngineError;
use crate::types::{
    CHEAT_PENALTY, DEFAULT_COLS, DEFAULT_ROWS, FAST_FALL_POINTS, FAST_TICK_MS, MAX_CHEATS,
    ROW_CLEAR_POINTS, TICK_MS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Board height in rows
    pub rows: usize,
    /// Board width in columns
    pub cols: usize,
    /// Cheats granted on every (re)start
    pub max_cheats: u32,
    /// Points removed by a successful cheat
    pub cheat_penalty: u32,
    /// Advance interval in milliseconds
    pub tick_ms: u32,
    /// Advance interval while fast-dropping
    pub fast_tick_ms: u32,
    /// Points per full row removed on settle
    pub row_clear_points: u32,
    /// Points per fast-fall step
    pub fast_fall_points: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            max_cheats: MAX_CHEATS,
            cheat_penalty: CHEAT_PENALTY,
            tick_ms: TICK_MS,
            fast_tick_ms: FAST_TICK_MS,
            row_clear_points: ROW_CLEAR_POINTS,
            fast_fall_points: FAST_FALL_POINTS,
        }
    }
}

impl EngineConfig {
    /// Default tuning with explicit board dimensions
    pub fn with_dimensions(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Build a config from `FALLBLOCK_*` environment variables.
    ///
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        use std::env;

        fn var<T: std::str::FromStr>(name: &str) -> Option<T> {
            env::var(name).ok().and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            rows: var("FALLBLOCK_ROWS").unwrap_or(defaults.rows),
            cols: var("FALLBLOCK_COLS").unwrap_or(defaults.cols),
            max_cheats: var("FALLBLOCK_MAX_CHEATS").unwrap_or(defaults.max_cheats),
            tick_ms: var("FALLBLOCK_TICK_MS").unwrap_or(defaults.tick_ms),
            fast_tick_ms: var("FALLBLOCK_FAST_TICK_MS").unwrap_or(defaults.fast_tick_ms),
            ..defaults
        }
    }

    /// Check every value; dimensions first so callers get `InvalidDimension`.
    pub fn validate(&self) -> Result<(), EngineError> {
        check_dimensions(self.rows, self.cols)?;
        if self.tick_ms == 0 {
            return Err(EngineError::InvalidConfig("tick_ms must be > 0".into()));
        }
        if self.fast_tick_ms == 0 || self.fast_tick_ms > self.tick_ms {
            return Err(EngineError::InvalidConfig(
                "fast_tick_ms must be in 1..=tick_ms".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.rows, 25);
        assert_eq!(config.cols, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let config = EngineConfig::with_dimensions(0, 10);
        assert_eq!(
            config.validate(),
            Err(EngineError::InvalidDimension { rows: 0, cols: 10 })
        );
        let config = EngineConfig::with_dimensions(20, 0);
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_tick_intervals_validated() {
        let config = EngineConfig {
            fast_tick_ms: 500,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"rows": 20}"#).unwrap();
        assert_eq!(config.rows, 20);
        assert_eq!(config.cols, 10);
        assert_eq!(config.max_cheats, 3);
    }

    #[test]
    fn test_oversized_dimension_rejected() {
        let config = EngineConfig::with_dimensions(20, i32::MAX as usize + 1);
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidDimension { rows: 20, .. })
        ));
    }

    #[test]
    fn test_from_env_overrides_and_fallbacks() {
        std::env::set_var("FALLBLOCK_ROWS", " 18 ");
        std::env::set_var("FALLBLOCK_COLS", "wide");
        std::env::set_var("FALLBLOCK_TICK_MS", "250");
        let config = EngineConfig::from_env();
        std::env::remove_var("FALLBLOCK_ROWS");
        std::env::remove_var("FALLBLOCK_COLS");
        std::env::remove_var("FALLBLOCK_TICK_MS");

        assert_eq!(config.rows, 18);
        assert_eq!(config.cols, DEFAULT_COLS);
        assert_eq!(config.tick_ms, 250);
        assert_eq!(config.max_cheats, MAX_CHEATS);
    }
}
