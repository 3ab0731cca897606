//! Combat domain: tests for health, shield routing and turrets.

use std::time::Duration;

use avian2d::prelude::CollisionStart;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::systems::{age_projectiles, projectile_contacts};
use super::{DamageOutcome, PlayerHealth, PlayerHit, Projectile, Turret, TurretConfig};
use crate::abilities::{Shield, ShieldConfig};
use crate::actions::ActionGate;
use crate::animation::AnimationState;
use crate::movement::Player;

fn shield_on(strength: i32) -> Shield {
    let mut shield = Shield::new(ShieldConfig {
        strength,
        ..Default::default()
    });
    shield.grant();
    assert_eq!(
        shield.toggle(true, &mut ActionGate::default(), AnimationState::Idle),
        Some(true)
    );
    shield
}

// -----------------------------------------------------------------------------
// Health
// -----------------------------------------------------------------------------

#[test]
fn test_health_floor_is_one() {
    assert_eq!(PlayerHealth::new(0).current(), 1);
    assert_eq!(PlayerHealth::new(-4).original(), 1);
}

#[test]
fn test_damage_without_shield() {
    let mut health = PlayerHealth::new(3);
    assert_eq!(
        health.take_damage(1, None),
        DamageOutcome::Hurt { remaining: 2 }
    );
    assert_eq!(health.take_damage(5, None), DamageOutcome::Killed);
    assert_eq!(health.current(), 0);
    assert_eq!(health.take_damage(1, None), DamageOutcome::Ignored);
}

#[test]
fn test_non_positive_damage_is_ignored() {
    let mut health = PlayerHealth::new(3);
    assert_eq!(health.take_damage(0, None), DamageOutcome::Ignored);
    assert_eq!(health.take_damage(-2, None), DamageOutcome::Ignored);
    assert_eq!(health.current(), 3);
}

#[test]
fn test_shield_takes_damage_first() {
    let mut health = PlayerHealth::new(3);
    let mut shield = shield_on(2);

    assert_eq!(
        health.take_damage(1, Some(&mut shield)),
        DamageOutcome::Absorbed
    );
    assert_eq!(shield.strength(), 1);
    assert_eq!(health.current(), 3);

    // One point left in the shield, two go through and break it.
    assert_eq!(
        health.take_damage(3, Some(&mut shield)),
        DamageOutcome::Hurt { remaining: 1 }
    );
    assert!(!shield.is_on());
}

#[test]
fn test_shield_without_ability_passes_damage() {
    let mut health = PlayerHealth::new(3);
    let mut shield = Shield::new(ShieldConfig::default());
    assert_eq!(
        health.take_damage(1, Some(&mut shield)),
        DamageOutcome::Hurt { remaining: 2 }
    );
}

#[test]
fn test_set_health_rules() {
    let mut health = PlayerHealth::new(5);
    assert!(health.set_health(2));
    assert_eq!(health.current(), 2);
    assert!(!health.set_health(0));
    assert_eq!(health.current(), 2);

    health.kill();
    assert!(health.is_dead());
    assert!(!health.set_health(3));

    health.restore_health();
    assert_eq!(health.current(), 5);
    assert!(health.set_health(3));
}

// -----------------------------------------------------------------------------
// Turrets and projectiles
// -----------------------------------------------------------------------------

#[test]
fn test_turret_first_shot_is_delayed() {
    let mut turret = Turret::new(TurretConfig::default(), 0.5);
    assert_eq!(turret.advance(1.0), 0);
    assert_eq!(turret.advance(0.5), 1);
    assert_eq!(turret.advance(0.5), 0);
    assert_eq!(turret.advance(0.5), 1);
}

#[test]
fn test_turret_long_frame_fires_skipped_shots() {
    let mut turret = Turret::new(TurretConfig::default(), 0.0);
    assert_eq!(turret.advance(3.5), 3);
}

#[test]
fn test_turret_sweeps_back_and_forth() {
    let mut turret = Turret::new(
        TurretConfig {
            max_angle_diff: 30.0,
            ..Default::default()
        },
        0.0,
    );

    turret.advance(1.0);
    assert_eq!(turret.angle(), 20.0);
    turret.advance(1.0);
    assert_eq!(turret.angle(), 30.0);
    turret.advance(1.0);
    assert_eq!(turret.angle(), 10.0);
    turret.advance(1.0);
    assert_eq!(turret.angle(), 0.0);
    turret.advance(1.0);
    assert_eq!(turret.angle(), 20.0);
}

#[test]
fn test_turret_loop_rotation_wraps() {
    let mut turret = Turret::new(
        TurretConfig {
            angle: 350.0,
            loop_rotation: true,
            ..Default::default()
        },
        0.0,
    );
    turret.advance(1.0);
    assert_eq!(turret.angle(), 10.0);
}

#[test]
fn test_turret_without_sweep_holds_angle() {
    let mut turret = Turret::new(
        TurretConfig {
            angle: 90.0,
            ..Default::default()
        },
        0.0,
    );
    turret.advance(2.0);
    assert_eq!(turret.angle(), 90.0);
    assert!((turret.aim() - Vec2::Y).length() < 1e-5);
}

fn projectile() -> Projectile {
    let source: Entity = World::new().spawn_empty().id();
    Projectile {
        damage: 1,
        source,
        spawn: Vec2::ZERO,
        lifetime: 1.0,
        despawn_distance: 100.0,
    }
}

#[test]
fn test_projectile_expires_by_lifetime() {
    let mut shot = projectile();
    assert!(!shot.expire(Vec2::new(50.0, 0.0), 0.5));
    assert!(shot.expire(Vec2::new(60.0, 0.0), 0.5));
}

#[test]
fn test_projectile_expires_by_distance() {
    let mut shot = projectile();
    assert!(shot.expire(Vec2::new(0.0, -100.0), 0.1));
}

fn projectile_app() -> App {
    let mut app = App::new();
    app.insert_resource(Time::<()>::default())
        .add_message::<CollisionStart>()
        .add_message::<PlayerHit>()
        .add_systems(Update, (age_projectiles, projectile_contacts).chain());
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(0.1));
    app
}

fn touch(app: &mut App, a: Entity, b: Entity) {
    app.world_mut().write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
}

#[test]
fn test_projectile_hits_once_and_despawns() {
    let mut app = projectile_app();
    let turret = app.world_mut().spawn_empty().id();
    let player = app.world_mut().spawn(Player).id();
    let shot = app
        .world_mut()
        .spawn((
            Projectile {
                source: turret,
                ..projectile()
            },
            Transform::default(),
        ))
        .id();

    touch(&mut app, shot, player);
    touch(&mut app, player, shot);
    app.update();

    assert_eq!(app.world().resource::<Messages<PlayerHit>>().len(), 1);
    assert!(app.world().get_entity(shot).is_err());
}

#[test]
fn test_expired_projectile_touching_player_is_removed_once() {
    let mut app = projectile_app();
    let turret = app.world_mut().spawn_empty().id();
    let player = app.world_mut().spawn(Player).id();
    let spent = Projectile {
        source: turret,
        lifetime: 0.05,
        ..projectile()
    };
    let shot = app.world_mut().spawn((spent, Transform::default())).id();

    touch(&mut app, shot, player);
    app.update();

    assert!(app.world().get_entity(shot).is_err());
    assert_eq!(app.world().resource::<Messages<PlayerHit>>().len(), 0);
}
