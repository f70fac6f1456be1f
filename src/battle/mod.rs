//! Battle loop - one player against one monster, cycle by cycle
//!
//! The loop never reads input itself: the player's choice comes from a
//! `DecisionSource`, so console play, scripts and autopilot share one path.

pub mod decision;
pub mod execution;

// Re-exports for convenient access
pub use decision::{Action, AutoPilot, ConsoleDecision, DecisionSource, ScriptedDecisions};
pub use execution::{check_battle_end, BattleOutcome, BattlePhase, BattleState};
