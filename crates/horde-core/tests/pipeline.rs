//! End-to-end tests for the decision pipeline over the in-memory world.
//!
//! These drive [`AgentBrain`] and [`run_simulation`] against a
//! [`GridWorld`] and check the observable contract: which desires
//! survive arbitration, which intentions live, what command is committed,
//! and that every route opened is released exactly once.

#![allow(clippy::unwrap_used)]

use horde_agents::BehaviorConfig;
use horde_core::{
    AbandonReason, AgentBrain, GridDriver, NoOpCallback, SimulationConfig, SimulationEndReason,
    SimulationState, WorldDriver, run_simulation,
};
use horde_types::{BlockId, Bounds, DesireKind, EntityClass, EntityId, Vec2};
use horde_world::{BlockTopology, GridWorld, IntegrationSettings};

fn square(min_x: f32, min_y: f32, size: f32) -> Bounds {
    Bounds::new(Vec2::new(min_x, min_y), Vec2::new(min_x + size, min_y + size))
}

fn fast_config(max_ticks: u64) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.world.max_ticks = max_ticks;
    config.world.tick_interval_ms = 0;
    config
}

/// Home block (0..10) with one survivor, and an enclosed, stocked block
/// next door that is worth migrating to.
fn migration_world() -> (GridWorld, EntityId, BlockId) {
    let mut world = GridWorld::new();
    world.add_block(square(0.0, 0.0, 10.0)).unwrap();
    let rich = world.add_block(square(10.0, 0.0, 10.0)).unwrap();
    world.set_enclosed(rich, true).unwrap();
    world
        .spawn_resource(EntityClass::ResourcePile, Vec2::new(15.0, 5.0), 40)
        .unwrap();
    let me = world
        .spawn_human(EntityClass::Survivor, Vec2::new(5.0, 5.0), 100.0)
        .unwrap();
    (world, me, rich)
}

#[test]
fn quiet_agent_in_best_block_only_wanders() {
    let mut world = GridWorld::new();
    let home = world.add_block(square(0.0, 0.0, 20.0)).unwrap();
    world.add_block(square(20.0, 0.0, 20.0)).unwrap();
    world.set_enclosed(home, true).unwrap();
    let me = world
        .spawn_human(EntityClass::Survivor, Vec2::new(10.0, 10.0), 100.0)
        .unwrap();
    let config = BehaviorConfig::default();
    let mut brain = AgentBrain::new(me);

    let report = brain.think(&world, &config, 0.0);
    assert_eq!(report.discovered, 2);
    assert_eq!(
        report.resolved,
        vec![DesireKind::WallAvoidance, DesireKind::Wander]
    );
    assert_eq!(
        brain.intentions().kinds(),
        vec![DesireKind::WallAvoidance, DesireKind::Wander]
    );
    let command = brain.motor();
    assert!((command.movement.length() - config.wander_strength).abs() < 1e-4);
    assert!(command.attack.is_none());
    assert!(command.drop_item.is_none());
}

#[test]
fn lone_survivor_flees_zombie() {
    let mut world = GridWorld::new();
    world.add_block(square(0.0, 0.0, 40.0)).unwrap();
    let me = world
        .spawn_human(EntityClass::Survivor, Vec2::new(10.0, 10.0), 100.0)
        .unwrap();
    world
        .spawn_human(EntityClass::Zombie, Vec2::new(12.0, 10.0), 60.0)
        .unwrap();
    let config = BehaviorConfig::default();
    let mut brain = AgentBrain::new(me);

    let report = brain.think(&world, &config, 0.0);
    assert!(report.resolved.contains(&DesireKind::ThreatAvoidance));
    assert!(report.resolved.contains(&DesireKind::Avoidance));
    // 100 health against 60 is not safe to swarm.
    assert!(!report.resolved.contains(&DesireKind::Mobbing));
    assert!(brain.motor().movement.x < -1.0);
    assert!(brain.motor().attack.is_none());
}

#[test]
fn outnumbered_zombie_is_mobbed() {
    let mut world = GridWorld::new();
    world.add_block(square(0.0, 0.0, 40.0)).unwrap();
    let zombie = world
        .spawn_human(EntityClass::Zombie, Vec2::new(20.0, 20.0), 60.0)
        .unwrap();
    let me = world
        .spawn_human(EntityClass::Survivor, Vec2::new(21.0, 20.0), 100.0)
        .unwrap();
    for position in [
        Vec2::new(20.0, 22.0),
        Vec2::new(18.0, 20.0),
        Vec2::new(20.0, 18.0),
    ] {
        world
            .spawn_human(EntityClass::Survivor, position, 100.0)
            .unwrap();
    }
    let config = BehaviorConfig::default();
    let mut brain = AgentBrain::new(me);

    let report = brain.think(&world, &config, 0.0);
    // Mobbing beats fleeing; plain avoidance still stands beside it.
    assert!(report.resolved.contains(&DesireKind::Mobbing));
    assert!(!report.resolved.contains(&DesireKind::ThreatAvoidance));
    assert!(report.resolved.contains(&DesireKind::Avoidance));
    assert_eq!(brain.motor().attack, Some(zombie));
}

#[test]
fn player_order_displaces_migration() {
    let (world, me, _) = migration_world();
    let config = BehaviorConfig::default();
    let mut brain = AgentBrain::new(me);

    let report = brain.think(&world, &config, 0.0);
    assert!(report.resolved.contains(&DesireKind::Migration));

    brain.command_move(Vec2::new(5.0, 9.0), 0.5, &config);
    let report = brain.think(&world, &config, 1.0);
    assert!(report.resolved.contains(&DesireKind::PlayerMovement));
    assert!(!report.resolved.contains(&DesireKind::Migration));
    assert!(
        report
            .lifecycle
            .abandoned
            .contains(&(DesireKind::Migration, AbandonReason::Displaced))
    );
    assert!(brain.motor().movement.y > 1.0);
}

#[tokio::test]
async fn migration_keeps_one_route_until_arrival() {
    let (world, me, rich) = migration_world();
    let ledger = world.route_ledger();
    let config = fast_config(120);
    let mut state = SimulationState::new();
    let mut driver = GridDriver::new(world, IntegrationSettings::default());

    let result = run_simulation(&mut state, &mut driver, &config, &mut NoOpCallback)
        .await
        .unwrap();

    assert_eq!(result.end_reason, SimulationEndReason::MaxTicksReached);
    let position = driver.world().position_of(me).unwrap();
    assert_eq!(driver.world().block_at(position), Some(rich));
    // The same intention walked the whole way: one route, released once.
    assert_eq!(ledger.opened(), 1);
    assert_eq!(ledger.released(), 1);
    assert!(
        state
            .brain(me)
            .unwrap()
            .intentions()
            .get(DesireKind::Migration)
            .is_none()
    );
}

#[tokio::test]
async fn order_issued_before_run_is_followed() {
    let mut world = GridWorld::new();
    world.add_block(square(0.0, 0.0, 20.0)).unwrap();
    let me = world
        .spawn_human(EntityClass::Survivor, Vec2::new(3.0, 10.0), 100.0)
        .unwrap();
    let ledger = world.route_ledger();
    let config = fast_config(80);
    let mut state = SimulationState::new();
    let mut driver = GridDriver::new(world, IntegrationSettings::default());

    state.sync_agents(&driver.agents());
    state
        .brain_mut(me)
        .unwrap()
        .command_move(Vec2::new(8.0, 10.0), 0.0, &config.behavior);

    run_simulation(&mut state, &mut driver, &config, &mut NoOpCallback)
        .await
        .unwrap();

    let position = driver.world().position_of(me).unwrap();
    assert!(position.x > 5.0);
    assert_eq!(ledger.opened(), 1);
    assert_eq!(ledger.live(), 0);
    assert!(
        state
            .brain(me)
            .unwrap()
            .intentions()
            .get(DesireKind::PlayerMovement)
            .is_none()
    );
}

#[tokio::test]
async fn dropping_state_mid_route_releases_routes() {
    let (world, _, _) = migration_world();
    let ledger = world.route_ledger();
    let config = fast_config(3);
    let mut driver = GridDriver::new(world, IntegrationSettings::default());
    {
        let mut state = SimulationState::new();
        run_simulation(&mut state, &mut driver, &config, &mut NoOpCallback)
            .await
            .unwrap();
        assert_eq!(ledger.live(), 1);
    }
    assert_eq!(ledger.opened(), 1);
    assert_eq!(ledger.released(), 1);
    assert_eq!(ledger.live(), 0);
}

#[tokio::test]
async fn mixed_population_stays_on_navigable_ground() {
    let mut world = GridWorld::new();
    for row in 0..2_u8 {
        for col in 0..2_u8 {
            world
                .add_block(square(f32::from(col) * 15.0, f32::from(row) * 15.0, 15.0))
                .unwrap();
        }
    }
    world.add_wall(Bounds::new(Vec2::new(14.0, 2.0), Vec2::new(16.0, 13.0)));
    world
        .spawn_resource(EntityClass::ResourcePile, Vec2::new(5.0, 25.0), 20)
        .unwrap();
    for (x, y, class) in [
        (3.0, 3.0, EntityClass::Survivor),
        (12.0, 4.0, EntityClass::Survivor),
        (4.0, 24.0, EntityClass::Survivor),
        (20.0, 20.0, EntityClass::Zombie),
        (25.0, 5.0, EntityClass::Zombie),
    ] {
        world.spawn_human(class, Vec2::new(x, y), 80.0).unwrap();
    }
    let ledger = world.route_ledger();
    let mut state = SimulationState::new();
    let mut driver = GridDriver::new(world, IntegrationSettings::default());

    let result = run_simulation(&mut state, &mut driver, &fast_config(60), &mut NoOpCallback)
        .await
        .unwrap();
    assert_eq!(result.total_ticks, 60);
    for agent in driver.agents() {
        let position = driver.world().position_of(agent).unwrap();
        assert!(driver.world().is_navigable(position));
    }
    drop(state);
    assert_eq!(ledger.live(), 0);
    assert_eq!(ledger.opened(), ledger.released());
}
