//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of expeditions to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Seconds of simulated time per tick
    pub delta_time: f64,

    /// Maximum ticks per run before the run counts as timed out
    pub max_ticks_per_run: u64,

    /// Opponents per expedition roster
    pub roster_size: usize,

    /// Difficulty passed to opponent generation (1-based)
    pub difficulty: u32,

    /// Player stats for every run
    pub player_max_health: u32,
    pub player_damage_per_second: u32,
    pub player_retreat_threshold: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            delta_time: 0.1,
            max_ticks_per_run: 100_000,
            roster_size: 3,
            difficulty: 1,
            player_max_health: 100,
            player_damage_per_second: 10,
            player_retreat_threshold: 0.25,
        }
    }
}

impl SimConfig {
    /// Quick config for probing one difficulty tier.
    pub fn difficulty_probe(difficulty: u32) -> Self {
        Self {
            num_runs: 100,
            difficulty,
            ..Default::default()
        }
    }
}
