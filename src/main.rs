//! Battle for Survival - Entry Point
//!
//! Runs the standard duel in the terminal. The player's choices come from
//! stdin unless `--auto` hands them to the autopilot.

use std::io::{self, Write};

use battle_survival::battle::{AutoPilot, BattleState, ConsoleDecision, DecisionSource};
use battle_survival::combat::CombatLog;
use battle_survival::core::config::BattleConfig;
use battle_survival::core::error::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Battle for Survival - a hero against a monster
#[derive(Parser, Debug)]
#[command(name = "battle-survival")]
#[command(about = "Fight a monster turn by turn with attacks, heals and the Light Hammer")]
struct Args {
    /// Random seed for a reproducible battle
    #[arg(long)]
    seed: Option<u64>,

    /// Let the autopilot choose the player's actions
    #[arg(long)]
    auto: bool,

    /// Maximum cycles before the battle is called a stalemate
    #[arg(long, default_value_t = 1000)]
    max_cycles: u32,

    /// Enrage the monster once its health falls to this percentage
    #[arg(long)]
    enrage_below: Option<u32>,
}

fn main() -> Result<()> {
    // Logs go to stderr so narration on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("battle_survival=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = BattleConfig {
        max_cycles: args.max_cycles,
        enrage_below_percent: args.enrage_below,
        seed: args.seed,
    };

    let mut state = BattleState::standard(config)?;

    println!("\n=== BATTLE FOR SURVIVAL ===");
    println!("Seed: {}", state.seed());
    for event in &state.battle_log {
        println!("{}", event.description);
    }

    let mut decisions: Box<dyn DecisionSource> = if args.auto {
        Box::new(AutoPilot::default())
    } else {
        Box::new(ConsoleDecision::new(io::stdin().lock(), io::stdout()))
    };

    let outcome = state.run_observed(decisions.as_mut(), print_cycle)?;

    tracing::info!(?outcome, cycles = state.cycle, "Battle over");
    println!(
        "\nFinal state: {} {} HP, {} {} HP after {} turn(s).",
        state.player.creature.name,
        state.player.creature.health,
        state.monster.creature.name,
        state.monster.creature.health,
        state.cycle
    );
    io::stdout().flush()?;
    Ok(())
}

/// Print one cycle's narration
fn print_cycle(log: &CombatLog) {
    println!("\n--- Turn {} ---", log.cycle);
    for line in log.lines() {
        println!("{}", line);
    }
}
