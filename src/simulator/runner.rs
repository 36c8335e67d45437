//! Drives simulated expeditions through the real combat system.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::SimConfig;
use super::report::SimReport;
use crate::combat::generation::generate_roster;
use crate::combat::logic::{CombatEvent, CombatSystem, ExpeditionState};
use crate::combat::types::CombatEntityStats;

/// How one simulated expedition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Retreated,
    Failed,
    TimedOut,
}

/// Statistics for one simulated expedition.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub outcome: RunOutcome,
    pub opponents_defeated: u32,
    pub ticks: u64,
}

/// Runs the configured number of expeditions and aggregates a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut runs = Vec::with_capacity(config.num_runs as usize);
    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => StdRng::from_entropy(),
        };
        runs.push(simulate_single_run(config, &mut rng));
    }
    SimReport::from_runs(&runs, config.delta_time)
}

fn simulate_single_run(config: &SimConfig, rng: &mut impl Rng) -> RunStats {
    let player = match CombatEntityStats::new(
        "Sim Hero",
        config.player_max_health,
        config.player_damage_per_second,
        config.player_retreat_threshold,
    ) {
        Ok(player) => player,
        Err(_) => {
            return RunStats {
                outcome: RunOutcome::Failed,
                opponents_defeated: 0,
                ticks: 0,
            }
        }
    };
    let roster = generate_roster(rng, config.difficulty, config.roster_size.max(1));

    let mut system = CombatSystem::new();
    if system.start_expedition(player, roster).is_err() {
        // A fresh system is Idle and the roster is non-empty
        return RunStats {
            outcome: RunOutcome::Failed,
            opponents_defeated: 0,
            ticks: 0,
        };
    }

    let mut outcome = None;
    let mut opponents_defeated = 0u32;
    let mut ticks = 0u64;

    while ticks < config.max_ticks_per_run {
        let events = system.update(config.delta_time);
        ticks += 1;

        for event in &events {
            match event {
                CombatEvent::OpponentDefeated { .. } => opponents_defeated += 1,
                CombatEvent::ExpeditionCompleted => outcome = Some(RunOutcome::Completed),
                CombatEvent::RetreatTriggered => outcome = Some(RunOutcome::Retreated),
                CombatEvent::ExpeditionFailed => outcome = Some(RunOutcome::Failed),
                _ => {}
            }
        }

        if system.state() == ExpeditionState::Idle {
            break;
        }
    }

    RunStats {
        outcome: outcome.unwrap_or(RunOutcome::TimedOut),
        opponents_defeated,
        ticks,
    }
}
