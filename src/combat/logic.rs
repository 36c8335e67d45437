//! Expedition state machine and tick logic.
//!
//! [`CombatSystem`] owns at most one active expedition: the player entity, a
//! FIFO queue of opponents, and the current opponent. An external scheduler
//! drives it by calling [`CombatSystem::update`] with a delta time; each tick
//! advances exactly one state of the machine and returns the coarse-grained
//! events that occurred, for logging/UI collaborators to consume.

use std::collections::VecDeque;
use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::combat::types::{CombatEntityStats, EntityEvent};
use crate::core::constants::*;
use crate::core::status::ExpeditionStatus;

/// Misuse errors reported synchronously to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatError {
    /// `start_expedition` was called while an expedition is active.
    ExpeditionInProgress,
    /// `start_expedition` was called with an empty opponent roster.
    NoOpponents,
}

impl fmt::Display for CombatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatError::ExpeditionInProgress => write!(f, "an expedition is already in progress"),
            CombatError::NoOpponents => write!(f, "an expedition needs at least one opponent"),
        }
    }
}

impl std::error::Error for CombatError {}

/// The five mutually exclusive phases of an expedition.
///
/// Idle means no active expedition; every other state implies one. Idle is
/// both the initial state and the terminal state of every expedition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpeditionState {
    #[default]
    Idle,
    Traveling,
    Fighting,
    Retreating,
    Regenerating,
}

/// Coarse-grained events raised by the combat system for collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    /// A combat log line was appended.
    LogUpdated { message: String },
    PlayerHealthChanged { current: u32, max: u32 },
    OpponentHealthChanged { current: u32, max: u32 },
    OpponentDefeated { name: String },
    /// The expedition was abandoned, either automatically (health dropped
    /// below the retreat threshold) or via `force_retreat`.
    RetreatTriggered,
    /// Fired exactly once per successful expedition, after the last
    /// opponent falls and before the state leaves Fighting.
    ExpeditionCompleted,
    /// The player died in combat. Only reachable when the player's retreat
    /// threshold is misconfigured to 0.
    ExpeditionFailed,
}

/// One run of the player against an ordered opponent roster.
///
/// Owned exclusively by [`CombatSystem`] while active; defeated opponents
/// are discarded, not retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Expedition {
    id: Uuid,
    started_at: i64,
    player: CombatEntityStats,
    queue: VecDeque<CombatEntityStats>,
    current_opponent: Option<CombatEntityStats>,
    travel_timer: f64,
    retreat_timer: f64,
    /// Whole health points restored so far during Regenerating.
    regen_applied: u32,
}

/// Orchestrator for expeditions: commands in, queries and events out.
///
/// Single-threaded and non-reentrant; the tick function is total and never
/// fails mid-update. While an expedition is active the system holds
/// exclusive ownership of the player and all opponents, exposing read-only
/// views through the query methods.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CombatSystem {
    state: ExpeditionState,
    expedition: Option<Expedition>,
    #[serde(skip)]
    combat_log: VecDeque<String>,
}

impl CombatSystem {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Begins a new expedition, taking ownership of the player and the
    /// opponent roster. Fails while any expedition is active; the active
    /// run is never interrupted by a second start. On success returns the
    /// departure events, as `update` does for tick events.
    pub fn start_expedition(
        &mut self,
        player: CombatEntityStats,
        opponents: Vec<CombatEntityStats>,
    ) -> Result<Vec<CombatEvent>, CombatError> {
        if self.state != ExpeditionState::Idle {
            return Err(CombatError::ExpeditionInProgress);
        }
        if opponents.is_empty() {
            return Err(CombatError::NoOpponents);
        }

        let message = format!("{} sets out to face {} foes.", player.name(), opponents.len());
        self.expedition = Some(Expedition {
            id: Uuid::new_v4(),
            started_at: Utc::now().timestamp(),
            player,
            queue: opponents.into(),
            current_opponent: None,
            travel_timer: 0.0,
            retreat_timer: 0.0,
            regen_applied: 0,
        });
        self.state = ExpeditionState::Traveling;
        let mut events = Vec::new();
        Self::push_log(&mut self.combat_log, &mut events, message);
        Ok(events)
    }

    /// Advances the simulation by `delta_time` seconds and returns the
    /// events that occurred. No-op while Idle. Negative `delta_time` is a
    /// caller bug, not a domain error; it is clamped to 0 so the tick stays
    /// total.
    pub fn update(&mut self, delta_time: f64) -> Vec<CombatEvent> {
        let delta_time = delta_time.max(0.0);
        let mut events = Vec::new();
        match self.state {
            ExpeditionState::Idle => {}
            ExpeditionState::Traveling => self.tick_traveling(delta_time, &mut events),
            ExpeditionState::Fighting => self.tick_fighting(delta_time, &mut events),
            ExpeditionState::Retreating => self.tick_retreating(delta_time, &mut events),
            ExpeditionState::Regenerating => self.tick_regenerating(delta_time, &mut events),
        }
        events
    }

    /// Out-of-band interrupt: abandons combat immediately from any active
    /// state, dropping the current opponent and every queued one. No-op
    /// while Idle, and idempotent while already Retreating — repeated calls
    /// never fire a second `RetreatTriggered`.
    pub fn force_retreat(&mut self) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        match self.state {
            ExpeditionState::Idle | ExpeditionState::Retreating => {}
            ExpeditionState::Traveling
            | ExpeditionState::Fighting
            | ExpeditionState::Regenerating => {
                if let Some(exp) = self.expedition.as_mut() {
                    exp.current_opponent = None;
                    exp.queue.clear();
                    exp.retreat_timer = 0.0;
                    exp.player.reset_accumulator();
                }
                self.state = ExpeditionState::Retreating;
                events.push(CombatEvent::RetreatTriggered);
                Self::push_log(
                    &mut self.combat_log,
                    &mut events,
                    "Retreat ordered; the expedition is abandoned.".to_string(),
                );
            }
        }
        events
    }

    /// Hard clear back to Idle from any state: drops the expedition, the
    /// opponents, and every timer and accumulator with it.
    pub fn reset(&mut self) {
        self.state = ExpeditionState::Idle;
        self.expedition = None;
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn state(&self) -> ExpeditionState {
        self.state
    }

    pub fn player(&self) -> Option<&CombatEntityStats> {
        self.expedition.as_ref().map(|exp| &exp.player)
    }

    pub fn current_opponent(&self) -> Option<&CombatEntityStats> {
        self.expedition
            .as_ref()
            .and_then(|exp| exp.current_opponent.as_ref())
    }

    /// True iff the state is Fighting.
    pub fn is_in_combat(&self) -> bool {
        self.state == ExpeditionState::Fighting
    }

    /// True while any undefeated opponent is attached to the expedition,
    /// current or still queued.
    pub fn has_opponents_remaining(&self) -> bool {
        self.expedition
            .as_ref()
            .is_some_and(|exp| exp.current_opponent.is_some() || !exp.queue.is_empty())
    }

    pub fn expedition_id(&self) -> Option<Uuid> {
        self.expedition.as_ref().map(|exp| exp.id)
    }

    /// Unix timestamp recorded when the active expedition started.
    pub fn started_at(&self) -> Option<i64> {
        self.expedition.as_ref().map(|exp| exp.started_at)
    }

    /// The most recent log lines, oldest first, bounded at
    /// `COMBAT_LOG_CAPACITY`.
    pub fn combat_log(&self) -> &VecDeque<String> {
        &self.combat_log
    }

    /// Composite snapshot of everything the queries expose.
    pub fn status(&self) -> ExpeditionStatus {
        ExpeditionStatus::from_system(self)
    }

    // ── Tick internals ────────────────────────────────────────────────────

    fn tick_traveling(&mut self, delta_time: f64, events: &mut Vec<CombatEvent>) {
        let Some(exp) = self.expedition.as_mut() else {
            return;
        };
        exp.travel_timer += delta_time;
        if exp.travel_timer < TRAVEL_DURATION_SECONDS {
            return;
        }

        exp.current_opponent = exp.queue.pop_front();
        if let Some(opponent) = exp.current_opponent.as_ref() {
            let message = format!("Engaged {}.", opponent.name());
            self.state = ExpeditionState::Fighting;
            Self::push_log(&mut self.combat_log, events, message);
        } else {
            // start_expedition guarantees a non-empty roster
            self.state = ExpeditionState::Idle;
            self.expedition = None;
        }
    }

    fn tick_fighting(&mut self, delta_time: f64, events: &mut Vec<CombatEvent>) {
        let Some(exp) = self.expedition.as_mut() else {
            return;
        };

        // Fighting with no current opponent only arises from a restored
        // snapshot; promote from the queue so the fight can proceed.
        if exp.current_opponent.is_none() {
            match exp.queue.pop_front() {
                Some(next) => {
                    let message = format!("Engaged {}.", next.name());
                    exp.current_opponent = Some(next);
                    Self::push_log(&mut self.combat_log, events, message);
                }
                None => {
                    self.state = ExpeditionState::Idle;
                    self.expedition = None;
                    return;
                }
            }
        }

        // ── Phase 1: exchange damage through the fractional accumulators ──
        let player_dps = exp.player.damage_per_second() as f64;
        let mut opponent_dps = 0.0;
        if let Some(opponent) = exp.current_opponent.as_mut() {
            opponent_dps = opponent.damage_per_second() as f64;
            let owed = opponent.accrue(player_dps, delta_time);
            for _ in 0..owed {
                if !opponent.is_alive() {
                    break;
                }
                opponent.take_damage(1);
            }
            for event in opponent.drain_events() {
                if let EntityEvent::HealthChanged { current, max } = event {
                    events.push(CombatEvent::OpponentHealthChanged { current, max });
                }
            }
        }

        let owed = exp.player.accrue(opponent_dps, delta_time);
        for _ in 0..owed {
            if !exp.player.is_alive() {
                break;
            }
            exp.player.take_damage(1);
        }
        for event in exp.player.drain_events() {
            if let EntityEvent::HealthChanged { current, max } = event {
                events.push(CombatEvent::PlayerHealthChanged { current, max });
            }
        }

        // ── Phase 2: outcome checks, in fixed order ───────────────────────
        // Opponent death before player retreat, retreat before player death.
        let opponent_defeated = exp
            .current_opponent
            .as_ref()
            .is_some_and(|opponent| !opponent.is_alive());
        if opponent_defeated {
            let name = exp
                .current_opponent
                .take()
                .map(|opponent| opponent.name().to_string())
                .unwrap_or_default();
            events.push(CombatEvent::OpponentDefeated { name: name.clone() });
            Self::push_log(&mut self.combat_log, events, format!("{} was defeated.", name));
            exp.player.reset_accumulator();

            if let Some(next) = exp.queue.pop_front() {
                let message = format!("Engaged {}.", next.name());
                exp.current_opponent = Some(next);
                Self::push_log(&mut self.combat_log, events, message);
            } else {
                events.push(CombatEvent::ExpeditionCompleted);
                Self::push_log(
                    &mut self.combat_log,
                    events,
                    "All foes defeated. Expedition complete.".to_string(),
                );
                if exp.player.is_at_full_health() || !exp.player.is_alive() {
                    // Nothing left to regenerate (a dead player cannot recover)
                    self.state = ExpeditionState::Idle;
                    self.expedition = None;
                } else {
                    exp.regen_applied = 0;
                    exp.player.reset_accumulator();
                    self.state = ExpeditionState::Regenerating;
                }
            }
            return;
        }

        if exp.player.is_alive() && exp.player.should_retreat() {
            let message = format!("{} falls back to recover.", exp.player.name());
            // A retreat abandons the whole roster, not just the current foe
            exp.current_opponent = None;
            exp.queue.clear();
            exp.retreat_timer = 0.0;
            exp.player.reset_accumulator();
            self.state = ExpeditionState::Retreating;
            events.push(CombatEvent::RetreatTriggered);
            Self::push_log(&mut self.combat_log, events, message);
            return;
        }

        if !exp.player.is_alive() {
            let message = format!("{} has fallen. The expedition is lost.", exp.player.name());
            events.push(CombatEvent::ExpeditionFailed);
            Self::push_log(&mut self.combat_log, events, message);
            self.state = ExpeditionState::Idle;
            self.expedition = None;
        }
    }

    fn tick_retreating(&mut self, delta_time: f64, events: &mut Vec<CombatEvent>) {
        let Some(exp) = self.expedition.as_mut() else {
            return;
        };
        exp.retreat_timer += delta_time;
        if exp.retreat_timer < RETREAT_DURATION_SECONDS {
            return;
        }

        let message = format!("{} makes camp to recover.", exp.player.name());
        exp.regen_applied = 0;
        exp.player.reset_accumulator();
        self.state = ExpeditionState::Regenerating;
        Self::push_log(&mut self.combat_log, events, message);
    }

    fn tick_regenerating(&mut self, delta_time: f64, events: &mut Vec<CombatEvent>) {
        let Some(exp) = self.expedition.as_mut() else {
            return;
        };

        let owed = exp.player.accrue(REGEN_HEALTH_PER_SECOND, delta_time);
        if owed > 0 {
            let before = exp.player.current_health();
            exp.player.regenerate_health(owed);
            exp.regen_applied += exp.player.current_health() - before;
        }
        for event in exp.player.drain_events() {
            if let EntityEvent::HealthChanged { current, max } = event {
                events.push(CombatEvent::PlayerHealthChanged { current, max });
            }
        }

        let above_safety_margin = exp.player.health_percentage()
            >= exp.player.retreat_threshold() + RETREAT_SAFETY_MARGIN;
        if exp.player.is_at_full_health() || (above_safety_margin && exp.regen_applied > 0) {
            let message = format!("{} is ready for the next expedition.", exp.player.name());
            self.state = ExpeditionState::Idle;
            self.expedition = None;
            Self::push_log(&mut self.combat_log, events, message);
        }
    }

    fn push_log(log: &mut VecDeque<String>, events: &mut Vec<CombatEvent>, message: String) {
        if log.len() >= COMBAT_LOG_CAPACITY {
            log.pop_front();
        }
        log.push_back(message.clone());
        events.push(CombatEvent::LogUpdated { message });
    }

}
