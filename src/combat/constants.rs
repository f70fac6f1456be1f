//! Combat system constants - all tunable values in one place

// Stat bounds (applied at construction only)
pub const STAT_MIN: i32 = 1;
pub const STAT_MAX: i32 = 30;

// Dice
pub const DIE_SIDES: u8 = 6;
/// Lowest face that counts as a success (5 or 6 on a d6)
pub const HIT_THRESHOLD: u8 = 5;

// Healing
/// Heal ceiling as a percentage of current health
pub const HEAL_PERCENT: i32 = 30;

// Player special ability
pub const SPECIAL_ABILITY_NAME: &str = "Light Hammer";
pub const SPECIAL_ATTACK_MULTIPLIER: i32 = 3;
/// Self-inflicted damage is this multiple of the nominal special damage
pub const SPECIAL_SELF_DAMAGE_MULTIPLIER: i32 = 2;
pub const SPECIAL_COOLDOWN_CYCLES: u32 = 3;

// Monster enrage
pub const ENRAGE_ATTACK_BONUS: i32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_bounds_ordered() {
        assert!(STAT_MIN > 0 && STAT_MIN < STAT_MAX);
    }

    #[test]
    fn test_hit_threshold_on_die() {
        assert!(HIT_THRESHOLD >= 1 && HIT_THRESHOLD <= DIE_SIDES);
        assert!(HEAL_PERCENT > 0 && HEAL_PERCENT < 100);
    }
}
