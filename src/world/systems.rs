//! World domain: building the test level.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::abilities::AbilityTrigger;
use crate::combat::{spawn_turret, KillZone};
use crate::content::ContentRegistry;
use crate::core::CurrentLevel;
use crate::movement::{GameLayer, Ground, MovementTuning, Wall};
use crate::save::{Checkpoint, Saveable};
use crate::world::layout::{BlockKind, LevelLayout};
use crate::world::player::spawn_player;

const SENSOR_SIZE: Vec2 = Vec2::new(28.0, 28.0);
const CRATE_SIZE: f32 = 32.0;

pub(crate) fn apply_gravity(mut commands: Commands, tuning: Res<MovementTuning>) {
    commands.insert_resource(Gravity(Vec2::NEG_Y * tuning.gravity));
}

fn sensor_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player])
}

pub(crate) fn spawn_test_level(
    mut commands: Commands,
    content: Res<ContentRegistry>,
    tuning: Res<MovementTuning>,
    level: Res<CurrentLevel>,
) {
    let layout = LevelLayout::test_level();

    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_layers = CollisionLayers::new(
        GameLayer::Ground,
        [GameLayer::Player, GameLayer::Projectile, GameLayer::Ground],
    );
    let wall_layers = CollisionLayers::new(
        GameLayer::Wall,
        [GameLayer::Player, GameLayer::Projectile, GameLayer::Ground],
    );

    for block in &layout.blocks {
        let color = match block.kind {
            BlockKind::Ground => ground_color,
            BlockKind::Wall => wall_color,
        };
        let mut entity = commands.spawn((
            Name::new(block.name),
            Sprite {
                color,
                custom_size: Some(block.size),
                ..default()
            },
            Transform::from_translation(block.center.extend(0.0))
                .with_rotation(Quat::from_rotation_z(block.tilt.to_radians())),
            RigidBody::Static,
            Collider::rectangle(block.size.x, block.size.y),
        ));
        match block.kind {
            BlockKind::Ground => entity.insert((Ground, ground_layers)),
            BlockKind::Wall => entity.insert((Wall, wall_layers)),
        };
    }

    for (ability, position) in &layout.triggers {
        commands.spawn((
            Name::new(format!("{} trigger", ability)),
            AbilityTrigger::new(ability.clone()),
            Sprite {
                color: Color::srgb(0.9, 0.8, 0.2),
                custom_size: Some(SENSOR_SIZE),
                ..default()
            },
            Transform::from_translation(position.extend(0.2)),
            RigidBody::Static,
            Collider::rectangle(SENSOR_SIZE.x, SENSOR_SIZE.y),
            Sensor,
            CollisionEventsEnabled,
            sensor_layers(),
        ));
    }

    for (id, position) in &layout.checkpoints {
        commands.spawn((
            Name::new(format!("Checkpoint {}", id)),
            Checkpoint { id: id.clone() },
            Sprite {
                color: Color::srgb(0.3, 0.8, 0.4),
                custom_size: Some(Vec2::new(12.0, 48.0)),
                ..default()
            },
            Transform::from_translation(position.extend(0.2)),
            RigidBody::Static,
            Collider::rectangle(12.0, 48.0),
            Sensor,
            CollisionEventsEnabled,
            sensor_layers(),
        ));
    }

    let (pit_center, pit_size) = layout.kill_zone;
    commands.spawn((
        Name::new("Kill pit"),
        KillZone,
        Transform::from_translation(pit_center.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(pit_size.x, pit_size.y),
        Sensor,
        CollisionEventsEnabled,
        sensor_layers(),
    ));

    for (position, config) in &layout.turrets {
        spawn_turret(&mut commands, config.clone(), *position);
    }

    for (name, position) in &layout.crates {
        commands.spawn((
            Name::new(name.clone()),
            Saveable::new(name.clone()),
            Ground,
            Sprite {
                color: Color::srgb(0.55, 0.4, 0.25),
                custom_size: Some(Vec2::splat(CRATE_SIZE)),
                ..default()
            },
            Transform::from_translation(position.extend(0.1)),
            RigidBody::Dynamic,
            Collider::rectangle(CRATE_SIZE, CRATE_SIZE),
            LockedAxes::ROTATION_LOCKED,
            ground_layers,
        ));
    }

    info!(
        "Level '{}' built: {} blocks, {} triggers, {} checkpoints",
        level.scene,
        layout.blocks.len(),
        layout.triggers.len(),
        layout.checkpoints.len()
    );

    spawn_player(&mut commands, &content.player, &tuning, level.spawn_point);
}
