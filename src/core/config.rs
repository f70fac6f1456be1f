//! Battle configuration with documented settings
//!
//! Combat numbers (dice, heal percentage, cooldowns) are constants in
//! `combat::constants`. This struct only holds what a single battle run
//! may vary.

use crate::core::types::Cycle;

/// Configuration for one battle
#[derive(Debug, Clone)]
pub struct BattleConfig {
    /// Hard upper bound on cycles before the battle is called a stalemate
    ///
    /// With the standard duel a battle lasts well under 20 cycles, so the
    /// default only matters for degenerate setups (zero damage ranges,
    /// a player healing forever).
    pub max_cycles: Cycle,

    /// Automatic enrage trigger, as a percentage of the monster's max health
    ///
    /// When set, the monster becomes enraged the first time its health drops
    /// to or below this share of its max health. `None` leaves enrage as a
    /// manual capability only.
    pub enrage_below_percent: Option<u32>,

    /// Seed for the battle RNG
    ///
    /// `None` draws a seed from entropy. The chosen seed is always recorded
    /// on the battle so a run can be replayed.
    pub seed: Option<u64>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_cycles: 1000,
            enrage_below_percent: None,
            seed: None,
        }
    }
}

impl BattleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.max_cycles == 0 {
            return Err("max_cycles must be at least 1".into());
        }

        if let Some(percent) = self.enrage_below_percent {
            if percent == 0 || percent > 100 {
                return Err(format!(
                    "enrage_below_percent ({}) must be within 1..=100",
                    percent
                ));
            }
        }

        Ok(())
    }
}
