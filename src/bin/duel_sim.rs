//! Headless Duel Simulator
//!
//! Runs many autopilot battles of the standard duel and prints a JSON
//! summary of the results.

use battle_survival::battle::{AutoPilot, BattleOutcome, BattleState};
use battle_survival::core::config::BattleConfig;
use battle_survival::core::error::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Headless Duel Simulator - batch autopilot battles
#[derive(Parser, Debug)]
#[command(name = "duel_sim")]
#[command(about = "Run autopilot battles and output a JSON summary")]
struct Args {
    /// Number of battles to run
    #[arg(long, short = 'n', default_value_t = 1000)]
    battles: u32,

    /// Seed of the first battle; battle i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum cycles per battle before it is called a stalemate
    #[arg(long, default_value_t = 1000)]
    max_cycles: u32,

    /// Autopilot heals below this percentage of max health
    #[arg(long, default_value_t = 25)]
    heal_below: i32,

    /// Enrage the monster once its health falls to this percentage
    #[arg(long)]
    enrage_below: Option<u32>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

/// JSON output structure
#[derive(Serialize, Default)]
struct SimulationSummary {
    battles: u32,
    base_seed: u64,
    player_wins: u32,
    monster_wins: u32,
    stalemates: u32,
    player_win_rate: f64,
    mean_cycles: f64,
    max_cycles: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("battle_survival=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let base_seed = args.seed.unwrap_or_else(rand::random);

    let mut summary = SimulationSummary {
        battles: args.battles,
        base_seed,
        ..SimulationSummary::default()
    };
    let mut total_cycles: u64 = 0;

    for i in 0..args.battles {
        let config = BattleConfig {
            max_cycles: args.max_cycles,
            enrage_below_percent: args.enrage_below,
            seed: Some(base_seed.wrapping_add(i as u64)),
        };
        let mut state = BattleState::standard(config)?;
        let mut pilot = AutoPilot {
            heal_below_percent: args.heal_below,
        };

        match state.run(&mut pilot)? {
            BattleOutcome::PlayerWins => summary.player_wins += 1,
            BattleOutcome::MonsterWins => summary.monster_wins += 1,
            BattleOutcome::Draw | BattleOutcome::Undecided => summary.stalemates += 1,
        }
        total_cycles += state.cycle as u64;
        summary.max_cycles = summary.max_cycles.max(state.cycle);
    }

    if args.battles > 0 {
        summary.player_win_rate = summary.player_wins as f64 / args.battles as f64;
        summary.mean_cycles = total_cycles as f64 / args.battles as f64;
    }
    tracing::info!(
        player_wins = summary.player_wins,
        monster_wins = summary.monster_wins,
        "Simulation complete"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{}", json);
    Ok(())
}
