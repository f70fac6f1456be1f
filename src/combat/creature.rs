//! Shared creature state and mechanics
//!
//! Player and Monster both embed a `Creature`. The battle loop only ever
//! needs the operations here, reached through the `Fighter` trait.

use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::buff::Buff;
use crate::combat::constants::{HEAL_PERCENT, STAT_MAX, STAT_MIN};
use crate::combat::dice::{any_success, roll_pool};
use crate::combat::events::{CombatEventKind, CombatLog};
use crate::core::error::{BattleError, Result};

/// A combatant's stats, health and active buffs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    /// Clamped to [STAT_MIN, STAT_MAX] at construction, may exceed it later
    pub attack: i32,
    /// Clamped to [STAT_MIN, STAT_MAX] at construction
    pub defense: i32,
    /// Never negative
    pub health: i32,
    /// Health at construction, the healing cap
    max_health: i32,
    /// Damage dealt on a successful hit
    pub damage_range: RangeInclusive<i32>,
    /// Active buffs in attachment order
    buffs: Vec<Buff>,
}

impl Creature {
    pub fn new(
        name: impl Into<String>,
        attack: i32,
        defense: i32,
        health: i32,
        damage_range: RangeInclusive<i32>,
    ) -> Self {
        let health = health.max(0);
        Self {
            name: name.into(),
            attack: attack.clamp(STAT_MIN, STAT_MAX),
            defense: defense.clamp(STAT_MIN, STAT_MAX),
            health,
            max_health: health,
            damage_range,
            buffs: Vec::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn buffs(&self) -> &[Buff] {
        &self.buffs
    }

    pub fn has_buff(&self, name: &str) -> bool {
        self.buffs.iter().any(|b| b.name() == name)
    }

    /// Reduce health, saturating at zero
    ///
    /// Negative damage is a programming error and halts the battle.
    pub fn take_damage(&mut self, amount: i32) -> Result<()> {
        if amount < 0 {
            return Err(BattleError::NegativeDamage(amount));
        }
        self.health = self.health.saturating_sub(amount).max(0);
        Ok(())
    }

    /// Largest heal the current health allows (30% of current, rounded down)
    pub fn heal_ceiling(&self) -> i32 {
        (self.health as i64 * HEAL_PERCENT as i64 / 100) as i32
    }

    /// Heal by a random amount in [1, heal_ceiling], capped at max health
    ///
    /// Returns the health actually restored. Dead creatures, creatures
    /// too weak for a ceiling of at least 1 and creatures already at max
    /// health restore nothing.
    pub fn heal<R: Rng + ?Sized>(&mut self, rng: &mut R, log: &mut CombatLog) -> i32 {
        let ceiling = self.heal_ceiling();
        let healed = if self.is_alive() && ceiling >= 1 {
            let amount = rng.gen_range(1..=ceiling);
            let cap = self.max_health.max(self.health);
            let before = self.health;
            self.health = self.health.saturating_add(amount).min(cap);
            self.health - before
        } else {
            0
        };

        let description = if healed > 0 {
            format!("{} healed for {} (health {}).", self.name, healed, self.health)
        } else if self.is_alive() && self.health >= self.max_health {
            format!("{} is already at full health.", self.name)
        } else {
            format!("{} could not heal.", self.name)
        };
        log.push(
            CombatEventKind::Healed {
                target: self.name.clone(),
                amount: healed,
            },
            description,
        );
        healed
    }

    /// Number of dice rolled against `target` (never below 1)
    pub fn attack_modifier(&self, target: &Creature) -> usize {
        (self.attack - target.defense + 1).max(1) as usize
    }

    /// Resolve one attack against `target`
    ///
    /// Rolls `attack_modifier` dice; any 5 or 6 is a hit, which deals a
    /// uniform draw from this creature's damage range. A miss has no effect.
    pub fn attack<R: Rng + ?Sized>(
        &self,
        target: &mut Creature,
        rng: &mut R,
    ) -> Result<AttackOutcome> {
        let rolls = roll_pool(rng, self.attack_modifier(target));
        tracing::trace!(attacker = %self.name, ?rolls, "dice rolled");

        if !any_success(&rolls) {
            return Ok(AttackOutcome {
                attacker: self.name.clone(),
                target: target.name.clone(),
                rolls,
                damage: None,
            });
        }

        if self.damage_range.is_empty() {
            return Err(BattleError::EmptyDamageRange {
                name: self.name.clone(),
                min: *self.damage_range.start(),
                max: *self.damage_range.end(),
            });
        }
        let damage = rng.gen_range(self.damage_range.clone());
        target.take_damage(damage)?;

        Ok(AttackOutcome {
            attacker: self.name.clone(),
            target: target.name.clone(),
            rolls,
            damage: Some(damage),
        })
    }

    /// Attach a buff and announce it
    pub fn apply_buff(&mut self, buff: Buff, log: &mut CombatLog) {
        buff.apply(&self.name, log);
        self.buffs.push(buff);
    }

    /// Tick every buff once, then drop the expired ones
    pub fn update_buffs(&mut self, log: &mut CombatLog) {
        for buff in self.buffs.iter_mut() {
            buff.update(&self.name, log);
        }
        self.buffs.retain(|b| !b.is_expired());
    }
}

/// Result of a single attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub attacker: String,
    pub target: String,
    /// Every die rolled, in order
    pub rolls: Vec<u8>,
    /// Damage dealt, `None` on a miss
    pub damage: Option<i32>,
}

impl AttackOutcome {
    pub fn is_hit(&self) -> bool {
        self.damage.is_some()
    }

    /// Record the outcome as a combat event
    pub fn log(&self, log: &mut CombatLog) {
        let kind = match self.damage {
            Some(damage) => CombatEventKind::AttackHit {
                attacker: self.attacker.clone(),
                target: self.target.clone(),
                damage,
            },
            None => CombatEventKind::AttackMissed {
                attacker: self.attacker.clone(),
                target: self.target.clone(),
            },
        };
        log.push(kind, self.to_string());
    }
}

impl fmt::Display for AttackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.damage {
            Some(damage) => write!(
                f,
                "{} successfully attacked {} for {} damage.",
                self.attacker, self.target, damage
            ),
            None => write!(f, "{}'s attack on {} missed.", self.attacker, self.target),
        }
    }
}

/// What the battle loop needs from either side
pub trait Fighter {
    fn creature(&self) -> &Creature;

    fn creature_mut(&mut self) -> &mut Creature;

    fn name(&self) -> &str {
        &self.creature().name
    }

    fn is_alive(&self) -> bool {
        self.creature().is_alive()
    }

    /// Upkeep at the end of every cycle, whether or not this side acted
    fn end_cycle(&mut self, log: &mut CombatLog) {
        self.creature_mut().update_buffs(log);
    }
}

impl Fighter for Creature {
    fn creature(&self) -> &Creature {
        self
    }

    fn creature_mut(&mut self) -> &mut Creature {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn knight() -> Creature {
        Creature::new("Knight", 10, 5, 100, 10..=20)
    }

    fn goblin() -> Creature {
        Creature::new("Goblin", 8, 3, 80, 8..=15)
    }

    #[test]
    fn test_stats_clamped_at_construction() {
        let c = Creature::new("Odd", 0, 99, -5, 1..=2);
        assert_eq!(c.attack, STAT_MIN);
        assert_eq!(c.defense, STAT_MAX);
        assert_eq!(c.health, 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_take_damage_saturates() {
        let mut c = goblin();
        c.take_damage(30).unwrap();
        assert_eq!(c.health, 50);

        c.take_damage(500).unwrap();
        assert_eq!(c.health, 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_negative_damage_rejected() {
        let mut c = goblin();
        let err = c.take_damage(-1).unwrap_err();
        assert!(matches!(err, BattleError::NegativeDamage(-1)));
        assert!(err.is_invariant_violation());
        assert_eq!(c.health, 80);
    }

    #[test]
    fn test_attack_modifier_floor() {
        let weak = Creature::new("Weak", 1, 1, 10, 1..=1);
        let wall = Creature::new("Wall", 1, 30, 10, 1..=1);
        assert_eq!(weak.attack_modifier(&wall), 1);
        assert_eq!(knight().attack_modifier(&goblin()), 8);
    }

    #[test]
    fn test_attack_outcome_consistent_with_dice() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let attacker = knight();

        for _ in 0..200 {
            let mut target = goblin();
            target.health = 1000;
            let outcome = attacker.attack(&mut target, &mut rng).unwrap();

            assert_eq!(outcome.rolls.len(), 8);
            assert_eq!(outcome.is_hit(), any_success(&outcome.rolls));
            match outcome.damage {
                Some(d) => {
                    assert!((10..=20).contains(&d));
                    assert_eq!(target.health, 1000 - d);
                    assert!(outcome.to_string().contains("successfully attacked"));
                }
                None => {
                    assert_eq!(target.health, 1000);
                    assert!(outcome.to_string().contains("missed"));
                }
            }
        }
    }

    #[test]
    fn test_empty_damage_range_is_error_on_hit() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        #[allow(clippy::reversed_empty_ranges)]
        let broken = Creature::new("Broken", 30, 1, 10, 5..=1);
        let mut target = Creature::new("Dummy", 1, 1, 10, 1..=1);

        // 30 dice: a hit is all but certain, so the range is reached
        let mut saw_error = false;
        for _ in 0..10 {
            if let Err(e) = broken.attack(&mut target, &mut rng) {
                assert!(matches!(e, BattleError::EmptyDamageRange { .. }));
                saw_error = true;
                break;
            }
        }
        assert!(saw_error);
        assert_eq!(target.health, 10);
    }

    #[test]
    fn test_heal_bounded_by_current_health() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut log = CombatLog::new();

        for _ in 0..100 {
            let mut c = knight();
            c.health = 40;
            let healed = c.heal(&mut rng, &mut log);
            assert!((1..=12).contains(&healed));
            assert_eq!(c.health, 40 + healed);
        }
    }

    #[test]
    fn test_heal_capped_at_max_health() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut log = CombatLog::new();
        let mut c = knight();
        c.health = 99;

        c.heal(&mut rng, &mut log);
        assert_eq!(c.health, 100);

        assert_eq!(c.heal(&mut rng, &mut log), 0);
        assert_eq!(c.health, 100);
    }

    #[test]
    fn test_heal_at_full_health_narration() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut log = CombatLog::new();
        let mut c = knight();

        assert_eq!(c.heal(&mut rng, &mut log), 0);
        assert_eq!(c.health, 100);
        assert_eq!(log.events[0].description, "Knight is already at full health.");
    }

    #[test]
    fn test_heal_large_health() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut log = CombatLog::new();
        let mut c = Creature::new("Giant", 5, 5, 200_000_000, 1..=1);
        c.health = 100_000_000;

        assert_eq!(c.heal_ceiling(), 30_000_000);
        let healed = c.heal(&mut rng, &mut log);
        assert!((1..=30_000_000).contains(&healed));
        assert_eq!(c.health, 100_000_000 + healed);

        let mut titan = Creature::new("Titan", 5, 5, i32::MAX, 1..=1);
        titan.health = i32::MAX - 1;
        assert_eq!(titan.heal(&mut rng, &mut log), 1);
        assert_eq!(titan.health, i32::MAX);
    }

    #[test]
    fn test_too_weak_to_heal() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut log = CombatLog::new();
        let mut c = knight();
        c.health = 3;

        assert_eq!(c.heal_ceiling(), 0);
        assert_eq!(c.heal(&mut rng, &mut log), 0);
        assert_eq!(c.health, 3);
        assert_eq!(log.events[0].description, "Knight could not heal.");
    }

    #[test]
    fn test_buffs_removed_after_duration() {
        let mut c = knight();
        let mut log = CombatLog::new();
        c.apply_buff(Buff::new("Attack Boost", 3), &mut log);
        c.apply_buff(Buff::new("Haste", 1), &mut log);

        c.update_buffs(&mut log);
        assert!(c.has_buff("Attack Boost"));
        assert!(!c.has_buff("Haste"));

        c.update_buffs(&mut log);
        c.update_buffs(&mut log);
        assert!(c.buffs().is_empty());
        assert!(log.contains(|k| matches!(
            k,
            CombatEventKind::BuffExpired { buff, .. } if buff == "Attack Boost"
        )));
    }
}
