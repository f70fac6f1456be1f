//! The monster: a creature that can become enraged

use serde::{Deserialize, Serialize};

use crate::combat::constants::ENRAGE_ATTACK_BONUS;
use crate::combat::creature::{Creature, Fighter};
use crate::combat::events::{CombatEventKind, CombatLog};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub creature: Creature,
    /// Name of the monster's special ability (data only)
    pub special_ability: String,
    enraged: bool,
}

impl Monster {
    pub fn new(creature: Creature, special_ability: impl Into<String>) -> Self {
        Self {
            creature,
            special_ability: special_ability.into(),
            enraged: false,
        }
    }

    /// The standard monster: attack 8, defense 3, health 80, damage 8-15
    pub fn brute() -> Self {
        Self::new(Creature::new("Monster", 8, 3, 80, 8..=15), "Enrage")
    }

    pub fn is_enraged(&self) -> bool {
        self.enraged
    }

    /// Raise attack by a flat bonus, once
    ///
    /// Attack is not re-clamped to the stat bounds. Returns false if the
    /// monster was already enraged.
    pub fn become_enraged(&mut self, log: &mut CombatLog) -> bool {
        if self.enraged {
            return false;
        }
        self.enraged = true;
        self.creature.attack += ENRAGE_ATTACK_BONUS;
        log.push(
            CombatEventKind::Enraged {
                name: self.creature.name.clone(),
                attack: self.creature.attack,
            },
            format!("{} becomes enraged! Attack increased.", self.creature.name),
        );
        true
    }

    /// Has health dropped to or below `percent` of max health?
    pub fn is_below_percent(&self, percent: u32) -> bool {
        let max = self.creature.max_health() as i64;
        (self.creature.health as i64) * 100 <= max * percent as i64
    }
}

impl Fighter for Monster {
    fn creature(&self) -> &Creature {
        &self.creature
    }

    fn creature_mut(&mut self) -> &mut Creature {
        &mut self.creature
    }
}
