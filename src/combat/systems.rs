//! Combat domain: turrets, projectiles, hazards and damage.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::abilities::AbilitySet;
use crate::audio::{SfxKind, SfxService};
use crate::combat::{
    DamageOutcome, KillZone, PlayerHealth, PlayerHit, PlayerKilled, Projectile, Turret,
    TurretConfig,
};
use crate::movement::{GameLayer, Player};

const PROJECTILE_RADIUS: f32 = 4.0;
/// Spawn projectiles just outside the barrel.
const MUZZLE_OFFSET: f32 = 14.0;

/// Spawn a turret whose first shot is delayed by a random share of its
/// interval.
pub fn spawn_turret(commands: &mut Commands, config: TurretConfig, position: Vec2) -> Entity {
    let mut rng = rand::rng();
    let delay = if config.delay_sync_factor > 0.0 {
        rng.random_range(0.0..=config.delay_sync_factor)
    } else {
        0.0
    };

    commands
        .spawn((
            Name::new("Turret"),
            Turret::new(config, delay),
            Sprite {
                color: Color::srgb(0.6, 0.2, 0.2),
                custom_size: Some(Vec2::splat(20.0)),
                ..default()
            },
            Transform::from_translation(position.extend(0.5)),
        ))
        .id()
}

pub(crate) fn tick_turrets(
    mut commands: Commands,
    time: Res<Time>,
    mut sfx: ResMut<SfxService>,
    mut turrets: Query<(Entity, &mut Turret, &mut Transform)>,
) {
    let dt = time.delta_secs();

    for (entity, mut turret, mut transform) in &mut turrets {
        let shots = turret.advance(dt);
        transform.rotation = Quat::from_rotation_z(turret.angle().to_radians());
        if shots == 0 {
            continue;
        }

        let aim = turret.aim();
        let origin = transform.translation.truncate() + aim * MUZZLE_OFFSET;
        let config = turret.config();
        for _ in 0..shots {
            spawn_projectile(&mut commands, entity, config, origin, aim);
        }
        sfx.play(&mut commands, SfxKind::Shot);
        debug!("Turret {:?} fired {} shot(s) at {:.1}°", entity, shots, turret.angle());
    }
}

fn spawn_projectile(
    commands: &mut Commands,
    source: Entity,
    config: &TurretConfig,
    origin: Vec2,
    direction: Vec2,
) {
    commands.spawn((
        Name::new("Projectile"),
        Projectile {
            damage: config.projectile_damage,
            source,
            spawn: origin,
            lifetime: config.projectile_lifetime,
            despawn_distance: config.projectile_despawn_distance,
        },
        RigidBody::Dynamic,
        GravityScale(0.0),
        Collider::circle(PROJECTILE_RADIUS),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(
            GameLayer::Projectile,
            [GameLayer::Player, GameLayer::Ground, GameLayer::Wall],
        ),
        LinearVelocity(direction * config.projectile_speed),
        Sprite {
            color: Color::srgb(1.0, 0.5, 0.1),
            custom_size: Some(Vec2::splat(PROJECTILE_RADIUS * 2.0)),
            ..default()
        },
        Transform::from_translation(origin.extend(0.6)),
    ));
}

pub(crate) fn age_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut projectiles: Query<(Entity, &mut Projectile, &Transform)>,
) {
    let dt = time.delta_secs();

    for (entity, mut projectile, transform) in &mut projectiles {
        if projectile.expire(transform.translation.truncate(), dt) {
            commands.entity(entity).try_despawn();
        }
    }
}

/// Projectiles vanish on the first thing they touch besides their turret.
/// One that expired this frame is already gone and hits nothing.
pub(crate) fn projectile_contacts(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    mut hits: MessageWriter<PlayerHit>,
    projectiles: Query<&Projectile>,
    players: Query<(), With<Player>>,
) {
    let mut gone = Vec::new();

    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (projectile_entity, other) in pairs {
            let Ok(projectile) = projectiles.get(projectile_entity) else {
                continue;
            };
            if other == projectile.source || gone.contains(&projectile_entity) {
                continue;
            }

            if players.contains(other) {
                hits.write(PlayerHit {
                    player: other,
                    damage: projectile.damage,
                });
            }
            gone.push(projectile_entity);
            commands.entity(projectile_entity).try_despawn();
        }
    }
}

pub(crate) fn kill_zone_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    mut killed: MessageWriter<PlayerKilled>,
    zones: Query<(), With<KillZone>>,
    mut players: Query<&mut PlayerHealth, With<Player>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (zone, player) in pairs {
            if !zones.contains(zone) {
                continue;
            }
            let Ok(mut health) = players.get_mut(player) else {
                continue;
            };
            if health.is_dead() {
                continue;
            }

            health.kill();
            info!("Player fell into a kill zone");
            killed.write(PlayerKilled { player });
        }
    }
}

pub(crate) fn apply_player_damage(
    mut hits: MessageReader<PlayerHit>,
    mut killed: MessageWriter<PlayerKilled>,
    mut players: Query<(&mut PlayerHealth, Option<&mut AbilitySet>)>,
) {
    for hit in hits.read() {
        let Ok((mut health, set)) = players.get_mut(hit.player) else {
            warn!("Hit for unknown player {:?}", hit.player);
            continue;
        };

        let forgiving = set.as_ref().is_some_and(|set| set.shield.in_forgiveness());
        let shield = set.map(|set| &mut set.into_inner().shield);
        match health.take_damage(hit.damage, shield) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Absorbed if forgiving => {
                debug!("Shield forgiveness absorbed {} damage", hit.damage)
            }
            DamageOutcome::Absorbed => debug!("Shield absorbed {} damage", hit.damage),
            DamageOutcome::Hurt { remaining } => {
                info!("Player hit for {}, {} hp left", hit.damage, remaining)
            }
            DamageOutcome::Killed => {
                info!("Player killed by a {} damage hit", hit.damage);
                killed.write(PlayerKilled { player: hit.player });
            }
        }
    }
}
