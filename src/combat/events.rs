//! Combat narration
//!
//! Every notification the core produces is a typed event with a
//! human-readable description. Events are observations, not control data.

use serde::{Deserialize, Serialize};

use crate::battle::BattleOutcome;
use crate::core::types::Cycle;

/// Log entry for combat events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatEvent {
    pub cycle: Cycle,
    pub kind: CombatEventKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEventKind {
    BattleStarted,
    BuffApplied { buff: String, target: String },
    BuffExpired { buff: String, target: String },
    AttackHit { attacker: String, target: String, damage: i32 },
    AttackMissed { attacker: String, target: String },
    Healed { target: String, amount: i32 },
    SpecialActivated { self_damage: i32, healed: i32 },
    SpecialNotReady,
    SpecialReady,
    Enraged { name: String, attack: i32 },
    BattleEnded { outcome: BattleOutcome },
}

/// Log of events from a single cycle
#[derive(Debug, Clone, Default)]
pub struct CombatLog {
    pub cycle: Cycle,
    pub events: Vec<CombatEvent>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty log stamped with the given cycle
    pub fn for_cycle(cycle: Cycle) -> Self {
        Self {
            cycle,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: CombatEventKind, description: String) {
        tracing::debug!(cycle = self.cycle, "{}", description);
        self.events.push(CombatEvent {
            cycle: self.cycle,
            kind,
            description,
        });
    }

    /// Narration lines in order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.description.as_str())
    }

    pub fn contains(&self, predicate: impl Fn(&CombatEventKind) -> bool) -> bool {
        self.events.iter().any(|e| predicate(&e.kind))
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
