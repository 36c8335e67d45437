//! Composite status view for read-side collaborators.
//!
//! Collaborators that only want a single read (status panels, toasts,
//! serialized snapshots) use [`ExpeditionStatus`] instead of issuing the
//! individual queries on [`CombatSystem`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::combat::logic::{CombatSystem, ExpeditionState};
use crate::combat::types::CombatEntityStats;

/// Read-only health snapshot of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityStatus {
    pub name: String,
    pub current_health: u32,
    pub max_health: u32,
    /// Current health as a fraction of max, in `0.0..=1.0`.
    pub health_percentage: f64,
}

impl EntityStatus {
    fn of(entity: &CombatEntityStats) -> Self {
        Self {
            name: entity.name().to_string(),
            current_health: entity.current_health(),
            max_health: entity.max_health(),
            health_percentage: entity.health_percentage(),
        }
    }
}

/// One-shot snapshot combining every query the combat system exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpeditionStatus {
    pub state: ExpeditionState,
    pub expedition_id: Option<Uuid>,
    /// Unix timestamp of the active expedition's start.
    pub started_at: Option<i64>,
    pub player: Option<EntityStatus>,
    pub opponent: Option<EntityStatus>,
    pub opponents_remaining: bool,
    pub in_combat: bool,
}

impl ExpeditionStatus {
    pub fn from_system(system: &CombatSystem) -> Self {
        Self {
            state: system.state(),
            expedition_id: system.expedition_id(),
            started_at: system.started_at(),
            player: system.player().map(EntityStatus::of),
            opponent: system.current_opponent().map(EntityStatus::of),
            opponents_remaining: system.has_opponents_remaining(),
            in_combat: system.is_in_combat(),
        }
    }

    /// Serializes the snapshot for collaborators outside the process.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
