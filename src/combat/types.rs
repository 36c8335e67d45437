use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::constants::RETREAT_THRESHOLD_MAX;

/// Error raised when an entity cannot be constructed.
///
/// Numeric stats are clamped to their minimum valid value instead of being
/// rejected; a missing name is the one hard required-field failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityError {
    BlankName,
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::BlankName => write!(f, "entity name must not be blank"),
        }
    }
}

impl std::error::Error for EntityError {}

/// Fine-grained events raised by an entity when its health changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityEvent {
    HealthChanged { current: u32, max: u32 },
    /// Fired exactly once, the first time health reaches 0.
    Died,
}

/// Mutable health/damage record for the player entity or an opponent.
///
/// Health is always kept in `0..=max_health`; the only mutators are
/// [`take_damage`](Self::take_damage), [`regenerate_health`](Self::regenerate_health)
/// and the crate-internal fractional accumulator used by the combat tick.
///
/// Events are not callbacks: each entity buffers [`EntityEvent`]s and whoever
/// owns the entity drains them with [`drain_events`](Self::drain_events).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatEntityStats {
    name: String,
    max_health: u32,
    current_health: u32,
    damage_per_second: u32,
    retreat_threshold: f64,
    /// Fractional damage (or regeneration) owed but not yet applied in whole
    /// units. This is what makes combat tick-rate independent.
    #[serde(default)]
    accumulator: f64,
    #[serde(skip)]
    pending_events: Vec<EntityEvent>,
}

impl CombatEntityStats {
    /// Creates an entity at full health.
    ///
    /// A blank name is a hard error. `max_health` and `damage_per_second`
    /// below 1 are clamped to 1, and `retreat_threshold` is clamped into
    /// `[0, RETREAT_THRESHOLD_MAX]` (0 disables retreat, used for opponents).
    pub fn new(
        name: impl Into<String>,
        max_health: u32,
        damage_per_second: u32,
        retreat_threshold: f64,
    ) -> Result<Self, EntityError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EntityError::BlankName);
        }
        let max_health = max_health.max(1);
        let retreat_threshold = if retreat_threshold.is_finite() {
            retreat_threshold.clamp(0.0, RETREAT_THRESHOLD_MAX)
        } else {
            0.0
        };
        Ok(Self {
            name,
            max_health,
            current_health: max_health,
            damage_per_second: damage_per_second.max(1),
            retreat_threshold,
            accumulator: 0.0,
            pending_events: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    pub fn damage_per_second(&self) -> u32 {
        self.damage_per_second
    }

    pub fn retreat_threshold(&self) -> f64 {
        self.retreat_threshold
    }

    /// Current health as a fraction of max, in `0.0..=1.0`.
    pub fn health_percentage(&self) -> f64 {
        self.current_health as f64 / self.max_health as f64
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    pub fn is_at_full_health(&self) -> bool {
        self.current_health == self.max_health
    }

    /// Re-evaluated on demand, never cached; always false when the
    /// threshold is 0.
    pub fn should_retreat(&self) -> bool {
        self.health_percentage() < self.retreat_threshold
    }

    /// Reduces health, clamped at 0. Queues `HealthChanged` on any net
    /// change and `Died` the first time health reaches 0; hitting a dead
    /// entity again queues nothing.
    pub fn take_damage(&mut self, amount: u32) {
        let before = self.current_health;
        self.current_health = self.current_health.saturating_sub(amount);
        if self.current_health != before {
            self.pending_events.push(EntityEvent::HealthChanged {
                current: self.current_health,
                max: self.max_health,
            });
            if self.current_health == 0 {
                self.pending_events.push(EntityEvent::Died);
            }
        }
    }

    /// Restores health, clamped at max. A dead entity stays dead;
    /// regeneration does not resurrect.
    pub fn regenerate_health(&mut self, amount: u32) {
        if self.current_health == 0 {
            return;
        }
        let before = self.current_health;
        self.current_health = self
            .current_health
            .saturating_add(amount)
            .min(self.max_health);
        if self.current_health != before {
            self.pending_events.push(EntityEvent::HealthChanged {
                current: self.current_health,
                max: self.max_health,
            });
        }
    }

    /// Adds `rate_per_second * delta_time` to the fractional accumulator and
    /// drains the whole units now owed. The sub-unit remainder is carried,
    /// so the total drained over a stretch of time does not depend on how
    /// that time was sliced into ticks.
    pub(crate) fn accrue(&mut self, rate_per_second: f64, delta_time: f64) -> u32 {
        self.accumulator = (self.accumulator + rate_per_second * delta_time).max(0.0);
        let whole = self.accumulator.floor().min(u32::MAX as f64);
        let units = whole as u32;
        self.accumulator -= whole;
        units
    }

    pub(crate) fn reset_accumulator(&mut self) {
        self.accumulator = 0.0;
    }

    /// Takes the queued entity events, leaving the buffer empty.
    pub fn drain_events(&mut self) -> Vec<EntityEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Restores the entity to a fresh pre-expedition state: full health,
    /// empty accumulator, no pending events. The player entity is long-lived
    /// and reset with this between expeditions.
    pub fn reset_for_expedition(&mut self) {
        self.current_health = self.max_health;
        self.accumulator = 0.0;
        self.pending_events.clear();
    }
}
