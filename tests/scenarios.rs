//! Integration tests: play whole waves through the public API.

use bulwark::Tuning;
use bulwark::sim::{GameEvent, GameState, Phase, tick};
use glam::Vec2;

/// Tuning where nothing spawns on its own, so tests control every agent
fn quiet_tuning() -> Tuning {
    Tuning {
        spawn_cap_base: 0,
        spawn_cap_per_wave: 0,
        ..Tuning::default()
    }
}

#[test]
fn test_wall_scenario_twenty_seconds() {
    // Wave 0, one wall, start the attack and run 20s at dt = 0.1
    let mut state = GameState::new(2024);
    let wall = state
        .request_place_obstacle(Vec2::new(250.0, 300.0))
        .expect("legal spot");
    assert!(state.request_start_attack());

    let mut spawned = 0;
    let mut shots = 0;
    let mut last_health = state.store.obstacle(wall).map(|o| o.health);

    for _ in 0..200 {
        tick(&mut state, 0.1);
        for event in state.drain_events() {
            match event {
                GameEvent::AgentSpawned { .. } => spawned += 1,
                GameEvent::ShotFired { .. } => shots += 1,
                _ => {}
            }
        }

        let health = state.store.obstacle(wall).map(|o| o.health);
        if let (Some(before), Some(now)) = (last_health, health) {
            assert!(now <= before, "wall healed from {before} to {now}");
        }
        last_health = health;
    }

    assert!(spawned >= 1, "no agents spawned");
    assert!(shots >= 1, "turret never fired");
}

#[test]
fn test_wave_one_plays_to_completion() {
    let mut state = GameState::new(77);
    assert!(state.request_start_attack());

    let dt = 1.0 / 60.0;
    let mut kills = 0;
    let mut steps = 0;
    while state.phase == Phase::Attacking && steps < 120 * 60 {
        tick(&mut state, dt);
        kills += state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::AgentKilled { .. }))
            .count();
        steps += 1;
    }

    assert_eq!(state.phase, Phase::Building);
    assert_eq!(state.wave, 1);
    assert_eq!(kills, 10);
    assert_eq!(state.gold, 120 + 40);
    // 10 kills, at least two hits each, plus the clear bonus
    assert!(state.score >= 10 * (10 + 2 * 2) + 50);
    assert!(state.store.agents.is_empty());
}

#[test]
fn test_agent_removed_on_lethal_hit() {
    for health in [1.0, 18.0, 19.0, 40.0, 54.0, 55.0] {
        let mut state = GameState::with_tuning(5, quiet_tuning());
        assert!(state.request_start_attack());
        let id = state
            .store
            .add_agent(state.objective.pos + Vec2::new(0.0, -80.0), 0.0, health);

        let mut hits = 0u64;
        let mut steps = 0;
        loop {
            let score_before = state.score;
            tick(&mut state, 0.01);
            steps += 1;
            let events = state.drain_events();
            let hit_now = events
                .iter()
                .filter(|e| matches!(e, GameEvent::ProjectileHit { agent, .. } if *agent == id))
                .count() as u64;
            hits += hit_now;

            let alive = state.store.agent(id).is_some();
            let lethal = hits as f32 * 18.0 >= health;
            assert_eq!(alive, !lethal, "health {health}: {hits} hits, alive={alive}");

            let kill_bonus = if alive { 0 } else { 10 };
            assert_eq!(state.score - score_before, hit_now * 2 + kill_bonus);

            if !alive || steps > 1000 {
                break;
            }
        }

        assert!(state.store.agent(id).is_none(), "health {health}: agent survived");
        assert_eq!(hits, (health / 18.0).ceil() as u64);
        assert_eq!(state.score, hits * 2 + 10);
    }
}

#[test]
fn test_wave_clear_bonus_for_each_wave() {
    for wave in 1..=6u32 {
        let mut state = GameState::with_tuning(9, quiet_tuning());
        state.wave = wave - 1;
        assert!(state.request_start_attack());
        assert_eq!(state.wave, wave);

        let gold = state.gold;
        let score = state.score;

        // Not yet past the grace period
        for _ in 0..11 {
            tick(&mut state, 0.1);
        }
        assert_eq!(state.phase, Phase::Attacking);

        for _ in 0..3 {
            tick(&mut state, 0.1);
        }
        assert_eq!(state.phase, Phase::Building);
        assert_eq!(state.gold, gold + 30 + 10 * wave);
        assert_eq!(state.score, score + 50);

        let cleared: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::WaveCleared { .. }))
            .collect();
        assert_eq!(
            cleared,
            vec![GameEvent::WaveCleared {
                wave,
                gold: 30 + 10 * wave,
                score: 50
            }]
        );
    }
}

#[test]
fn test_wave_waits_for_last_agent() {
    let mut state = GameState::with_tuning(9, quiet_tuning());
    state.request_start_attack();
    // Out of turret range and too slow to matter
    state.store.add_agent(Vec2::new(-2000.0, -2000.0), 1.0, 20.0);

    for _ in 0..100 {
        tick(&mut state, 0.05);
    }
    assert_eq!(state.phase, Phase::Attacking);

    if let Some(agent) = state.store.agents.first_mut() {
        agent.health = 0.0;
    }
    tick(&mut state, 0.05);
    // Timer has been running the whole time, so the clear is immediate
    assert_eq!(state.phase, Phase::Building);
}

#[test]
fn test_overwhelmed_core_falls_and_reset_recovers() {
    let mut state = GameState::new(31);
    state.request_start_attack();
    for i in 0..12 {
        let angle = i as f32 / 12.0 * std::f32::consts::TAU;
        let pos = state.objective.pos + Vec2::new(angle.cos(), angle.sin()) * 30.0;
        state.store.add_agent(pos, 40.0, 10_000.0);
    }

    let mut steps = 0;
    while state.phase == Phase::Attacking && steps < 10_000 {
        tick(&mut state, 0.05);
        assert!((0.0..=100.0).contains(&state.objective.health));
        steps += 1;
    }
    assert_eq!(state.phase, Phase::Defeated);
    assert_eq!(state.objective.health, 0.0);
    assert!(!state.store.agents.is_empty(), "defeat must not clear entities");
    assert!(
        state
            .request_place_obstacle(Vec2::new(100.0, 100.0))
            .is_err()
    );

    state.request_reset();
    assert_eq!(state.phase, Phase::Building);
    assert!(state.store.is_empty());
    assert!(state.request_start_attack());
}
