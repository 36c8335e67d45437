//! Expedition - tick-driven auto-combat simulation core.
//!
//! One player entity fights a finite, ordered queue of opponents, retreating
//! and recovering automatically when its health drops too low. The core is
//! advanced by an external scheduler calling [`CombatSystem::update`] with a
//! delta time; damage is exchanged through fractional accumulators so the
//! outcome is independent of the tick rate.

pub mod build_info;
pub mod combat;
pub mod core;
pub mod simulator;

pub use crate::combat::logic::{CombatError, CombatEvent, CombatSystem, ExpeditionState};
pub use crate::combat::types::{CombatEntityStats, EntityError, EntityEvent};
pub use crate::core::constants::TICK_INTERVAL_MS;
pub use crate::core::status::ExpeditionStatus;
