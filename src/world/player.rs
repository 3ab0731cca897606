//! World domain: spawning the player character.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::abilities::{index_player_parts, AbilityParts, AbilitySet};
use crate::actions::ActionGate;
use crate::animation::{AnimationDriver, AnimationParams, BodySprite, SpriteRoot};
use crate::combat::PlayerHealth;
use crate::content::PlayerDef;
use crate::movement::{
    ContactSample, GameLayer, LocomotionState, MovementTuning, Player, SpeedModifiers,
};
use crate::save::Saveable;

pub const PLAYER_NAME: &str = "Player";
/// Name of the child holding every sprite.
pub const SPRITES_NAME: &str = "Sprites";

/// A named sprite child of the `Sprites` root.
struct PartSprite {
    name: &'static str,
    offset: Vec2,
    size: Vec2,
    color: Color,
}

const BODY_PARTS: [PartSprite; 2] = [
    PartSprite {
        name: "head",
        offset: Vec2::new(0.0, 16.0),
        size: Vec2::new(16.0, 14.0),
        color: Color::srgb(0.8, 0.82, 0.85),
    },
    PartSprite {
        name: "torso",
        offset: Vec2::new(0.0, -4.0),
        size: Vec2::new(24.0, 36.0),
        color: Color::srgb(0.85, 0.87, 0.9),
    },
];

const ABILITY_PARTS: [PartSprite; 3] = [
    PartSprite {
        name: "Effect_Dash",
        offset: Vec2::new(-18.0, 0.0),
        size: Vec2::new(14.0, 30.0),
        color: Color::srgba(0.4, 0.9, 1.0, 0.6),
    },
    PartSprite {
        name: "shield_bubble",
        offset: Vec2::ZERO,
        size: Vec2::new(40.0, 60.0),
        color: Color::srgba(0.5, 0.6, 1.0, 0.35),
    },
    PartSprite {
        name: "fist",
        offset: Vec2::new(16.0, 2.0),
        size: Vec2::new(10.0, 10.0),
        color: Color::srgb(0.9, 0.6, 0.3),
    },
];

pub(crate) fn spawn_player(
    commands: &mut Commands,
    def: &PlayerDef,
    tuning: &MovementTuning,
    position: Vec2,
) -> Entity {
    let (abilities, roster_errors) = AbilitySet::new(
        def.abilities.dash.clone(),
        def.abilities.shield.clone(),
        def.abilities.punch.clone(),
    );
    for err in roster_errors {
        error!("Ability roster: {}", err);
    }
    debug!(
        "Locked abilities: {:?} of {}",
        abilities.roster().disabled_names(),
        abilities.roster().len()
    );

    let player = commands
        .spawn((
            // Identity & Movement
            (
                Name::new(PLAYER_NAME),
                Player,
                Saveable::new(PLAYER_NAME),
                LocomotionState::new(tuning),
                ContactSample::default(),
                SpeedModifiers::default(),
            ),
            // Arbitration & Abilities
            (
                ActionGate::new(def.action_rules.clone()),
                AnimationDriver::new(def.animation.clone()),
                AnimationParams::default(),
                abilities,
                PlayerHealth::new(def.health),
            ),
            Transform::from_translation(position.extend(1.0)),
            Visibility::default(),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(tuning.collider_width, tuning.collider_height),
                Mass(tuning.mass),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                Friction::new(0.0),
                CollisionEventsEnabled,
                CollisionLayers::new(
                    GameLayer::Player,
                    [
                        GameLayer::Ground,
                        GameLayer::Wall,
                        GameLayer::Sensor,
                        GameLayer::Projectile,
                    ],
                ),
            ),
        ))
        .id();

    let root = commands
        .spawn((
            Name::new(SPRITES_NAME),
            SpriteRoot,
            Transform::default(),
            Visibility::default(),
            ChildOf(player),
        ))
        .id();

    let mut named = Vec::new();
    for PartSprite {
        name,
        offset,
        size,
        color,
    } in BODY_PARTS
    {
        let mut part = commands.spawn((
            Name::new(name),
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(offset.extend(0.1)),
            ChildOf(root),
        ));
        if name == "torso" {
            part.insert(BodySprite);
        }
        named.push((name.to_string(), part.id()));
    }
    for PartSprite {
        name,
        offset,
        size,
        color,
    } in ABILITY_PARTS
    {
        // Ability parts stay hidden until their ability is enabled.
        let part = commands
            .spawn((
                Name::new(name),
                Sprite {
                    color,
                    custom_size: Some(size),
                    ..default()
                },
                Transform::from_translation(offset.extend(0.2)),
                Visibility::Hidden,
                ChildOf(root),
            ))
            .id();
        named.push((name.to_string(), part));
    }

    let (index, mut part_errors) = index_player_parts(named);
    let (parts, build_errors) = AbilityParts::build(&def.parts, &index);
    part_errors.extend(build_errors);
    for err in part_errors {
        error!("Ability parts: {}", err);
    }
    debug!("Parts known for: {:?}", parts.abilities().collect::<Vec<_>>());
    commands.entity(player).insert(parts);

    info!("Player spawned at {:?} with {} hp", position, def.health);
    player
}
