//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Battle cycle counter (simulation time unit)
///
/// One cycle is a player action, a monster action and a buff tick.
pub type Cycle = u32;

/// Which side of the duel an entity fights on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Monster,
}
