//! Battle execution loop
//!
//! Each cycle: player action -> monster attack -> buffs and cooldowns.
//! Liveness is checked after every health-changing step; the first death
//! ends the battle and nothing else in that cycle runs.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::battle::decision::{Action, DecisionSource};
use crate::combat::{Buff, CombatEvent, CombatEventKind, CombatLog, Fighter, Monster, Player};
use crate::core::config::BattleConfig;
use crate::core::error::{BattleError, Result};
use crate::core::types::{Cycle, Side};

/// Battle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattlePhase {
    #[default]
    AwaitingPlayerAction,
    AwaitingMonsterAction,
    ResolvingBuffs,
    Finished,
}

/// Battle outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattleOutcome {
    #[default]
    Undecided,
    PlayerWins,
    MonsterWins,
    /// Cycle limit reached with both sides standing
    Draw,
}

impl BattleOutcome {
    pub fn winner(&self) -> Option<Side> {
        match self {
            BattleOutcome::PlayerWins => Some(Side::Player),
            BattleOutcome::MonsterWins => Some(Side::Monster),
            BattleOutcome::Undecided | BattleOutcome::Draw => None,
        }
    }

    fn announcement(&self) -> &'static str {
        match self {
            BattleOutcome::PlayerWins => "Player wins!",
            BattleOutcome::MonsterWins => "Monster wins!",
            BattleOutcome::Draw => "Both sides are still standing. The battle ends in a stalemate.",
            BattleOutcome::Undecided => "The battle is undecided.",
        }
    }
}

/// Decide the outcome once a side has fallen
pub fn check_battle_end(player: &impl Fighter, monster: &impl Fighter) -> Option<BattleOutcome> {
    if !player.is_alive() {
        Some(BattleOutcome::MonsterWins)
    } else if !monster.is_alive() {
        Some(BattleOutcome::PlayerWins)
    } else {
        None
    }
}

/// Complete battle state
pub struct BattleState {
    pub player: Player,
    pub monster: Monster,
    pub config: BattleConfig,

    // Time
    pub cycle: Cycle,
    pub phase: BattlePhase,
    pub outcome: BattleOutcome,

    // Log
    pub battle_log: Vec<CombatEvent>,

    seed: u64,
    rng: ChaCha8Rng,
}

impl BattleState {
    pub fn new(player: Player, monster: Monster, config: BattleConfig) -> Result<Self> {
        config.validate().map_err(BattleError::InvalidConfig)?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut state = Self {
            player,
            monster,
            config,
            cycle: 0,
            phase: BattlePhase::AwaitingPlayerAction,
            outcome: BattleOutcome::Undecided,
            battle_log: Vec::new(),
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };

        let mut log = CombatLog::for_cycle(0);
        log.push(
            CombatEventKind::BattleStarted,
            format!(
                "{} faces {}!",
                state.player.name(),
                state.monster.name()
            ),
        );
        state.record(log);
        tracing::info!(seed, "Battle started");

        Ok(state)
    }

    /// The standard duel: hero with Attack Boost against a brute with Defense Boost
    pub fn standard(config: BattleConfig) -> Result<Self> {
        let mut state = Self::new(Player::hero(), Monster::brute(), config)?;
        state.apply_buff(Side::Player, Buff::new("Attack Boost", 3));
        state.apply_buff(Side::Monster, Buff::new("Defense Boost", 2));
        Ok(state)
    }

    /// Seed the battle RNG was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Is the battle finished?
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, BattlePhase::Finished)
    }

    /// Attach a buff to one side outside the cycle loop
    pub fn apply_buff(&mut self, side: Side, buff: Buff) {
        let mut log = CombatLog::for_cycle(self.cycle);
        match side {
            Side::Player => self.player.creature.apply_buff(buff, &mut log),
            Side::Monster => self.monster.creature.apply_buff(buff, &mut log),
        }
        self.record(log);
    }

    /// Run one complete cycle and return its events
    ///
    /// Events are kept in the battle log even when the cycle fails.
    pub fn run_cycle(&mut self, decisions: &mut dyn DecisionSource) -> Result<CombatLog> {
        if self.is_finished() {
            return Err(BattleError::BattleFinished(self.outcome));
        }

        self.cycle += 1;
        let mut log = CombatLog::for_cycle(self.cycle);
        let result = self.resolve_cycle(decisions, &mut log);
        self.record(log.clone());
        result.map(|_| log)
    }

    /// Run cycles until the battle is over
    pub fn run(&mut self, decisions: &mut dyn DecisionSource) -> Result<BattleOutcome> {
        self.run_observed(decisions, |_| {})
    }

    /// Run to the end, handing each cycle's events to `observer`
    pub fn run_observed(
        &mut self,
        decisions: &mut dyn DecisionSource,
        mut observer: impl FnMut(&CombatLog),
    ) -> Result<BattleOutcome> {
        while !self.is_finished() {
            let log = self.run_cycle(decisions)?;
            observer(&log);
        }
        Ok(self.outcome)
    }

    fn resolve_cycle(
        &mut self,
        decisions: &mut dyn DecisionSource,
        log: &mut CombatLog,
    ) -> Result<()> {
        // Health may have been changed from outside since the last cycle
        if self.check_end(log) {
            return Ok(());
        }

        // ===== PHASE 1: PLAYER =====
        self.phase = BattlePhase::AwaitingPlayerAction;
        let action = decisions.decide(&self.player, &self.monster)?;
        tracing::debug!(cycle = self.cycle, %action, "player decided");
        self.phase_player(action, log)?;
        if self.check_end(log) {
            return Ok(());
        }

        // ===== PHASE 2: MONSTER =====
        self.phase = BattlePhase::AwaitingMonsterAction;
        self.phase_monster(log)?;
        if self.check_end(log) {
            return Ok(());
        }

        // ===== PHASE 3: BUFFS =====
        self.phase = BattlePhase::ResolvingBuffs;
        self.player.end_cycle(log);
        self.monster.end_cycle(log);

        if self.cycle >= self.config.max_cycles {
            tracing::warn!(
                cycles = self.cycle,
                "Cycle limit reached, ending battle as a stalemate"
            );
            self.end_battle(BattleOutcome::Draw, log);
        } else {
            self.phase = BattlePhase::AwaitingPlayerAction;
        }

        Ok(())
    }

    fn phase_player(&mut self, action: Action, log: &mut CombatLog) -> Result<()> {
        match action {
            Action::Attack => {
                let outcome = self
                    .player
                    .creature
                    .attack(&mut self.monster.creature, &mut self.rng)?;
                outcome.log(log);
                self.check_enrage(log);
            }
            Action::Heal => {
                self.player.creature.heal(&mut self.rng, log);
            }
            Action::ActivateSpecial => {
                self.player.activate_special(&mut self.rng, log)?;
            }
        }
        Ok(())
    }

    fn phase_monster(&mut self, log: &mut CombatLog) -> Result<()> {
        let outcome = self
            .monster
            .creature
            .attack(&mut self.player.creature, &mut self.rng)?;
        outcome.log(log);
        Ok(())
    }

    fn check_enrage(&mut self, log: &mut CombatLog) {
        let Some(percent) = self.config.enrage_below_percent else {
            return;
        };
        if self.monster.is_alive() && self.monster.is_below_percent(percent) {
            self.monster.become_enraged(log);
        }
    }

    fn check_end(&mut self, log: &mut CombatLog) -> bool {
        match check_battle_end(&self.player, &self.monster) {
            Some(outcome) => {
                self.end_battle(outcome, log);
                true
            }
            None => false,
        }
    }

    /// End the battle with an outcome
    fn end_battle(&mut self, outcome: BattleOutcome, log: &mut CombatLog) {
        self.phase = BattlePhase::Finished;
        self.outcome = outcome;
        log.push(
            CombatEventKind::BattleEnded { outcome },
            outcome.announcement().to_string(),
        );
        tracing::info!(cycle = self.cycle, ?outcome, "Battle ended");
    }

    fn record(&mut self, log: CombatLog) {
        self.battle_log.extend(log.events);
    }
}
