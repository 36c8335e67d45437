// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;

// Expedition phase tuning. Callers treat these as the tunable parameter set.
pub const TRAVEL_DURATION_SECONDS: f64 = 3.0;
pub const RETREAT_DURATION_SECONDS: f64 = 2.0;
pub const REGEN_HEALTH_PER_SECOND: f64 = 10.0;

// Regeneration may stop early once the player is this far above their
// retreat threshold (and at least one whole point has been restored).
pub const RETREAT_SAFETY_MARGIN: f64 = 0.10;

// Retreat thresholds live in [0, 1); 0 disables retreat entirely.
pub const RETREAT_THRESHOLD_MAX: f64 = 0.99;

// Combat log
pub const COMBAT_LOG_CAPACITY: usize = 10;

// Opponent generation
pub const OPPONENT_BASE_HEALTH: u32 = 30;
pub const OPPONENT_HEALTH_PER_DIFFICULTY: u32 = 12;
pub const OPPONENT_BASE_DPS: u32 = 4;
pub const OPPONENT_DPS_PER_DIFFICULTY: u32 = 2;
pub const OPPONENT_STAT_VARIANCE_MIN: f64 = 0.9;
pub const OPPONENT_STAT_VARIANCE_MAX: f64 = 1.1;
