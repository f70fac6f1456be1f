//! Combat mechanics: dice, buffs, creatures and their abilities

pub mod buff;
pub mod constants;
pub mod creature;
pub mod dice;
pub mod events;
pub mod monster;
pub mod player;

pub use buff::Buff;
pub use creature::{AttackOutcome, Creature, Fighter};
pub use events::{CombatEvent, CombatEventKind, CombatLog};
pub use monster::Monster;
pub use player::{Player, SpecialOutcome};
