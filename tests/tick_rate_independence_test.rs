//! Damage and regeneration totals must not depend on how an interval is
//! sliced into ticks. Any slicing of the same wall-clock span lands within
//! one whole point of any other.

use expedition::core::constants::TRAVEL_DURATION_SECONDS;
use expedition::{CombatEntityStats, CombatSystem, ExpeditionState};

fn endless_fight(player_dps: u32, opponent_dps: u32) -> CombatSystem {
    // Both sides are too tough to die within the simulated spans, so the
    // system stays in Fighting for the whole comparison.
    let player = CombatEntityStats::new("Hero", 100_000, player_dps, 0.0).unwrap();
    let ogre = CombatEntityStats::new("Ogre", 100_000, opponent_dps, 0.0).unwrap();
    let mut system = CombatSystem::new();
    system.start_expedition(player, vec![ogre]).unwrap();
    system.update(TRAVEL_DURATION_SECONDS);
    assert_eq!(system.state(), ExpeditionState::Fighting);
    system
}

fn healths(system: &CombatSystem) -> (u32, u32) {
    (
        system.player().unwrap().current_health(),
        system.current_opponent().unwrap().current_health(),
    )
}

#[test]
fn test_one_big_tick_matches_many_small_ticks() {
    let mut coarse = endless_fight(10, 30);
    coarse.update(6.0);

    let mut fine = endless_fight(10, 30);
    for _ in 0..60 {
        fine.update(0.1);
    }

    let (coarse_player, coarse_opponent) = healths(&coarse);
    let (fine_player, fine_opponent) = healths(&fine);
    assert!(
        coarse_player.abs_diff(fine_player) <= 1,
        "player totals diverged: {} vs {}",
        coarse_player,
        fine_player
    );
    assert!(
        coarse_opponent.abs_diff(fine_opponent) <= 1,
        "opponent totals diverged: {} vs {}",
        coarse_opponent,
        fine_opponent
    );
}

#[test]
fn test_uneven_slices_match_one_big_tick() {
    let slices = [0.07, 0.13, 0.5, 0.3, 1.0, 0.25, 0.75, 1.5, 1.0, 0.5];
    assert!((slices.iter().sum::<f64>() - 6.0).abs() < 1e-9);

    let mut coarse = endless_fight(7, 13);
    coarse.update(6.0);

    let mut uneven = endless_fight(7, 13);
    for dt in slices {
        uneven.update(dt);
    }

    let (coarse_player, coarse_opponent) = healths(&coarse);
    let (uneven_player, uneven_opponent) = healths(&uneven);
    assert!(coarse_player.abs_diff(uneven_player) <= 1);
    assert!(coarse_opponent.abs_diff(uneven_opponent) <= 1);
}

#[test]
fn test_fractional_damage_accrues_across_ticks() {
    // 3 DPS at 0.1s per tick is 0.3 damage per tick. Whole points land
    // roughly every fourth tick; after 10 ticks exactly 3 have landed.
    let mut system = endless_fight(10, 3);
    for _ in 0..10 {
        system.update(0.1);
    }
    assert_eq!(system.player().unwrap().current_health(), 100_000 - 3);
}

#[test]
fn test_zero_and_negative_dt_change_nothing() {
    let mut system = endless_fight(10, 30);
    let before = healths(&system);

    assert!(system.update(0.0).is_empty());
    assert!(system.update(-5.0).is_empty());

    assert_eq!(healths(&system), before);
    assert_eq!(system.state(), ExpeditionState::Fighting);

    // A negative tick must not bank damage debt either: the next real tick
    // deals its normal share.
    system.update(1.0);
    let (player_health, _) = healths(&system);
    assert_eq!(player_health, before.0 - 30);
}

#[test]
fn test_huge_tick_is_absorbed_safely() {
    let mut system = endless_fight(10, 30);
    system.update(1_000.0);

    // Whoever ran out of health first ended the fight, but nothing
    // underflowed or overflowed.
    if let Some(p) = system.player() {
        assert!(p.current_health() <= p.max_health());
    }
    if let Some(o) = system.current_opponent() {
        assert!(o.current_health() <= o.max_health());
    }
}
