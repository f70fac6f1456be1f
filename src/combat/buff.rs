//! Timed buffs
//!
//! A buff is attached to exactly one creature, counts down once per cycle,
//! and is detached by its holder once expired. Buffs are narrative only:
//! they carry no stat change.

use serde::{Deserialize, Serialize};

use crate::combat::events::{CombatEventKind, CombatLog};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buff {
    name: String,
    /// Total duration in cycles (never zero)
    duration: u32,
    /// Cycles left, always <= duration
    remaining: u32,
}

impl Buff {
    /// New buff lasting `duration` cycles (a zero duration is raised to 1)
    pub fn new(name: impl Into<String>, duration: u32) -> Self {
        let duration = duration.max(1);
        Self {
            name: name.into(),
            duration,
            remaining: duration,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Announce the buff on its new holder
    pub fn apply(&self, target: &str, log: &mut CombatLog) {
        log.push(
            CombatEventKind::BuffApplied {
                buff: self.name.clone(),
                target: target.to_string(),
            },
            format!(
                "{} applied to {} for {} turns.",
                self.name, target, self.duration
            ),
        );
    }

    /// Count down one cycle, expiring on the transition to zero
    pub fn update(&mut self, target: &str, log: &mut CombatLog) {
        if self.remaining == 0 {
            return;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.expire(target, log);
        }
    }

    /// Announce expiry; the holder removes the buff afterwards
    pub fn expire(&self, target: &str, log: &mut CombatLog) {
        log.push(
            CombatEventKind::BuffExpired {
                buff: self.name.clone(),
                target: target.to_string(),
            },
            format!("{} expired on {}.", self.name, target),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buff_full_duration() {
        let buff = Buff::new("Attack Boost", 3);
        assert_eq!(buff.duration(), 3);
        assert_eq!(buff.remaining(), 3);
        assert!(!buff.is_expired());
    }

    #[test]
    fn test_zero_duration_raised() {
        let buff = Buff::new("Blink", 0);
        assert_eq!(buff.duration(), 1);
    }

    #[test]
    fn test_expires_exactly_once() {
        let mut buff = Buff::new("Defense Boost", 2);
        let mut log = CombatLog::new();

        buff.update("Monster", &mut log);
        assert!(!buff.is_expired());
        assert!(log.is_empty());

        buff.update("Monster", &mut log);
        assert!(buff.is_expired());
        assert_eq!(
            log.lines().collect::<Vec<_>>(),
            vec!["Defense Boost expired on Monster."]
        );

        // Further updates do not underflow or re-announce
        buff.update("Monster", &mut log);
        assert_eq!(buff.remaining(), 0);
        assert_eq!(log.events.len(), 1);
    }

    #[test]
    fn test_apply_narration() {
        let buff = Buff::new("Attack Boost", 3);
        let mut log = CombatLog::new();
        buff.apply("Player", &mut log);

        assert_eq!(
            log.events[0].description,
            "Attack Boost applied to Player for 3 turns."
        );
    }
}
