//! Engine configuration.

use crate::dice::DicePool;
use crate::error::{DiceError, EngineResult};

/// Configuration for a [`DiceEngine`](crate::DiceEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Largest number of dice of any one kind a pool may hold. 0 = unlimited.
    pub max_dice_per_kind: u32,
    /// Remember computed ratios per (pool, extra symbols, criterion).
    pub cache_chances: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_dice_per_kind: 0,
            cache_chances: true,
        }
    }
}

impl EngineConfig {
    /// Set the per-kind dice cap (0 = unlimited).
    pub fn with_max_dice_per_kind(mut self, max: u32) -> Self {
        self.max_dice_per_kind = max;
        self
    }

    /// Enable or disable the top-level chance cache.
    pub fn with_chance_cache(mut self, enabled: bool) -> Self {
        self.cache_chances = enabled;
        self
    }
    /// Reject `pool` if it holds more than `max_dice_per_kind` dice of any
    /// one kind.
    pub fn check_pool(&self, pool: &DicePool) -> EngineResult<()> {
        let max = self.max_dice_per_kind;
        if max > 0 && pool.max_per_kind() > max {
            return Err(DiceError::InvalidPool(format!(
                "{pool} has more than {max} dice of one kind"
            )));
        }
        Ok(())
    }
}
