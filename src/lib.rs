//! Battle for Survival - turn-based duel simulator

pub mod battle;
pub mod combat;
pub mod core;
