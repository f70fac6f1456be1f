//! The player: a creature with the Light Hammer special ability
//!
//! The ability is gated by a turn-counted cooldown that ticks down in the
//! end-of-cycle upkeep, together with buffs.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    SPECIAL_ABILITY_NAME, SPECIAL_ATTACK_MULTIPLIER, SPECIAL_COOLDOWN_CYCLES,
    SPECIAL_SELF_DAMAGE_MULTIPLIER,
};
use crate::combat::creature::{Creature, Fighter};
use crate::combat::events::{CombatEventKind, CombatLog};
use crate::core::error::Result;

/// Result of trying to use the special ability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialOutcome {
    /// Still cooling down; the turn is spent anyway
    NotReady { cycles_left: u32 },
    Activated { self_damage: i32, healed: i32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub creature: Creature,
    special_ready: bool,
    /// Cycles until the special ability is ready again (0 when ready)
    cooldown: u32,
}

impl Player {
    pub fn new(creature: Creature) -> Self {
        Self {
            creature,
            special_ready: true,
            cooldown: 0,
        }
    }

    /// The standard hero: attack 10, defense 5, health 100, damage 10-20
    pub fn hero() -> Self {
        Self::new(Creature::new("Player", 10, 5, 100, 10..=20))
    }

    pub fn is_special_ready(&self) -> bool {
        self.special_ready
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Nominal damage of the special ability
    pub fn special_damage(&self) -> i32 {
        self.creature.attack * SPECIAL_ATTACK_MULTIPLIER
    }

    /// Health the special ability costs when used
    pub fn special_self_damage(&self) -> i32 {
        self.special_damage() * SPECIAL_SELF_DAMAGE_MULTIPLIER
    }

    /// Use the special ability
    ///
    /// Costs twice the nominal damage in self-inflicted damage, then heals.
    /// Starts a cooldown of `SPECIAL_COOLDOWN_CYCLES` cycles.
    pub fn activate_special<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        log: &mut CombatLog,
    ) -> Result<SpecialOutcome> {
        if !self.special_ready {
            log.push(
                CombatEventKind::SpecialNotReady,
                format!(
                    "{} is not ready yet. Wait {} more turn(s).",
                    SPECIAL_ABILITY_NAME, self.cooldown
                ),
            );
            return Ok(SpecialOutcome::NotReady {
                cycles_left: self.cooldown,
            });
        }

        let self_damage = self.special_self_damage();
        self.creature.take_damage(self_damage)?;
        let healed = self.creature.heal(rng, log);

        log.push(
            CombatEventKind::SpecialActivated {
                self_damage,
                healed,
            },
            format!(
                "{} activated {} for {} damage, paying {} health!",
                self.creature.name,
                SPECIAL_ABILITY_NAME,
                self.special_damage(),
                self_damage
            ),
        );

        self.special_ready = false;
        self.cooldown = SPECIAL_COOLDOWN_CYCLES;

        Ok(SpecialOutcome::Activated {
            self_damage,
            healed,
        })
    }

    /// Count the cooldown down by one cycle
    pub fn tick_cooldown(&mut self, log: &mut CombatLog) {
        if self.special_ready {
            return;
        }
        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown == 0 {
            self.special_ready = true;
            log.push(
                CombatEventKind::SpecialReady,
                format!("{} is ready to use!", SPECIAL_ABILITY_NAME),
            );
        }
    }
}

impl Fighter for Player {
    fn creature(&self) -> &Creature {
        &self.creature
    }

    fn creature_mut(&mut self) -> &mut Creature {
        &mut self.creature
    }

    fn end_cycle(&mut self, log: &mut CombatLog) {
        self.creature.update_buffs(log);
        self.tick_cooldown(log);
    }
}
