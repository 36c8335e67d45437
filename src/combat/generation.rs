//! Opponent roster generation.
//!
//! The combat core never calls this itself; callers use it to build the
//! ordered roster handed to `start_expedition`. Opponents are generated with
//! a retreat threshold of 0 (they fight to the death).

use rand::Rng;

use crate::combat::types::CombatEntityStats;
use crate::core::constants::*;

/// Generates a three-part opponent name.
pub fn generate_opponent_name(rng: &mut impl Rng) -> String {
    let prefixes = [
        "Mire", "Crag", "Gloom", "Rust", "Thorn", "Howl", "Murk", "Ash", "Briar", "Gale",
    ];
    let roots = [
        "fang", "hide", "maul", "gnash", "shard", "claw", "snarl", "brand", "spike", "wail",
    ];
    let kinds = [
        "Stalker", "Brute", "Warden", "Shambler", "Ravager", "Lurker", "Husk", "Prowler",
        "Gnarl", "Reaver",
    ];

    let prefix = prefixes[rng.gen_range(0..prefixes.len())];
    let root = roots[rng.gen_range(0..roots.len())];
    let kind = kinds[rng.gen_range(0..kinds.len())];

    format!("{}{} {}", prefix, root, kind)
}

/// Generates one opponent scaled for `difficulty` (1-based), with ±10%
/// variance on health and damage.
pub fn generate_opponent(rng: &mut impl Rng, difficulty: u32) -> CombatEntityStats {
    let depth = difficulty.saturating_sub(1);
    let base_health = OPPONENT_BASE_HEALTH + depth * OPPONENT_HEALTH_PER_DIFFICULTY;
    let base_dps = OPPONENT_BASE_DPS + depth * OPPONENT_DPS_PER_DIFFICULTY;

    let health_var = rng.gen_range(OPPONENT_STAT_VARIANCE_MIN..OPPONENT_STAT_VARIANCE_MAX);
    let dps_var = rng.gen_range(OPPONENT_STAT_VARIANCE_MIN..OPPONENT_STAT_VARIANCE_MAX);

    let health = ((base_health as f64) * health_var).max(1.0) as u32;
    let dps = ((base_dps as f64) * dps_var).max(1.0) as u32;

    CombatEntityStats::new(generate_opponent_name(rng), health, dps, 0.0)
        .expect("generated opponent names are never blank")
}

/// Generates an ordered roster of `count` opponents at the same difficulty.
pub fn generate_roster(
    rng: &mut impl Rng,
    difficulty: u32,
    count: usize,
) -> Vec<CombatEntityStats> {
    (0..count).map(|_| generate_opponent(rng, difficulty)).collect()
}
