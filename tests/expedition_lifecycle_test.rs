//! End-to-end expedition lifecycle: travel, sequenced fights, completion.

use expedition::core::constants::TRAVEL_DURATION_SECONDS;
use expedition::{CombatEntityStats, CombatError, CombatEvent, CombatSystem, ExpeditionState};

fn player(max_health: u32, dps: u32, threshold: f64) -> CombatEntityStats {
    CombatEntityStats::new("Hero", max_health, dps, threshold).unwrap()
}

fn opponent(name: &str, max_health: u32, dps: u32) -> CombatEntityStats {
    CombatEntityStats::new(name, max_health, dps, 0.0).unwrap()
}

/// Starts an expedition and advances through the travel phase.
fn travel_to_fighting(system: &mut CombatSystem) {
    system.update(TRAVEL_DURATION_SECONDS);
    assert_eq!(system.state(), ExpeditionState::Fighting);
}

#[test]
fn test_player_vs_single_goblin() {
    // Player(100 HP, 10 DPS, threshold 0.25) vs Goblin(20 HP, 5 DPS):
    // the goblin dies on the second one-second tick.
    let mut system = CombatSystem::new();
    system
        .start_expedition(player(100, 10, 0.25), vec![opponent("Goblin", 20, 5)])
        .unwrap();
    travel_to_fighting(&mut system);

    system.update(1.0);
    assert_eq!(system.current_opponent().unwrap().current_health(), 10);
    assert_eq!(system.player().unwrap().current_health(), 95);

    let events = system.update(1.0);
    assert!(events.contains(&CombatEvent::OpponentDefeated {
        name: "Goblin".to_string()
    }));
    assert!(events.contains(&CombatEvent::ExpeditionCompleted));
    assert_eq!(system.state(), ExpeditionState::Regenerating);
    assert_eq!(system.player().unwrap().current_health(), 90);
}

#[test]
fn test_opponents_are_fought_in_fifo_order() {
    let roster = vec![
        opponent("Alpha", 10, 1),
        opponent("Beta", 10, 1),
        opponent("Gamma", 10, 1),
    ];
    let mut system = CombatSystem::new();
    system.start_expedition(player(100, 10, 0.25), roster).unwrap();
    travel_to_fighting(&mut system);
    assert_eq!(system.current_opponent().unwrap().name(), "Alpha");

    let mut defeated = Vec::new();
    let mut completions = 0;
    for _ in 0..100 {
        for event in system.update(1.0) {
            match event {
                CombatEvent::OpponentDefeated { name } => defeated.push(name),
                CombatEvent::ExpeditionCompleted => completions += 1,
                _ => {}
            }
        }
        if system.state() == ExpeditionState::Idle {
            break;
        }
    }

    assert_eq!(defeated, vec!["Alpha", "Beta", "Gamma"]);
    assert_eq!(completions, 1, "completion must fire exactly once");
}

#[test]
fn test_completion_fires_before_leaving_fighting() {
    let mut system = CombatSystem::new();
    system
        .start_expedition(player(100, 20, 0.25), vec![opponent("Goblin", 20, 5)])
        .unwrap();
    travel_to_fighting(&mut system);

    let events = system.update(1.0);
    let defeated_idx = events
        .iter()
        .position(|e| matches!(e, CombatEvent::OpponentDefeated { .. }))
        .expect("opponent should fall this tick");
    let completed_idx = events
        .iter()
        .position(|e| *e == CombatEvent::ExpeditionCompleted)
        .expect("expedition should complete this tick");
    assert!(defeated_idx < completed_idx);
}

#[test]
fn test_second_start_is_rejected_and_harmless() {
    let mut system = CombatSystem::new();
    system
        .start_expedition(player(100, 10, 0.25), vec![opponent("Goblin", 20, 5)])
        .unwrap();
    let first_id = system.expedition_id();

    let result = system.start_expedition(player(50, 5, 0.0), vec![opponent("Imp", 5, 1)]);
    assert_eq!(result, Err(CombatError::ExpeditionInProgress));
    assert_eq!(system.state(), ExpeditionState::Traveling);
    assert_eq!(system.expedition_id(), first_id, "first expedition untouched");
    assert_eq!(system.player().unwrap().name(), "Hero");
}

#[test]
fn test_regeneration_returns_to_idle() {
    let mut system = CombatSystem::new();
    system
        .start_expedition(player(100, 10, 0.25), vec![opponent("Goblin", 20, 5)])
        .unwrap();
    travel_to_fighting(&mut system);
    system.update(1.0);
    system.update(1.0);
    assert_eq!(system.state(), ExpeditionState::Regenerating);

    // 90/100 HP is already above threshold + margin, so one whole point of
    // regen is enough to finish the expedition.
    system.update(0.1);
    assert_eq!(system.state(), ExpeditionState::Idle);
    assert!(system.player().is_none());
    assert!(system.current_opponent().is_none());
    assert!(!system.has_opponents_remaining());
}

#[test]
fn test_health_never_leaves_bounds() {
    let mut system = CombatSystem::new();
    system
        .start_expedition(
            player(100, 7, 0.25),
            vec![opponent("Brute", 60, 13), opponent("Ogre", 500, 21)],
        )
        .unwrap();

    for tick in 0..500 {
        system.update(0.33);
        if let Some(p) = system.player() {
            assert!(
                p.current_health() <= p.max_health(),
                "player out of bounds on tick {}",
                tick
            );
        }
        if let Some(o) = system.current_opponent() {
            assert!(o.current_health() <= o.max_health());
        }
        if system.state() == ExpeditionState::Idle {
            break;
        }
    }
}
