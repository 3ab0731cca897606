//! Animation domain: driving the state machine and the player's visuals.

use bevy::prelude::*;

use crate::animation::{AnimationDriver, AnimationParams, AnimationState, AnimationTransition};
use crate::movement::{LocomotionState, SpeedModifiers};

/// Child entity holding every sprite of a character; mirrored on flip.
#[derive(Component, Debug)]
pub struct SpriteRoot;

/// The main body sprite, tinted by animation state.
#[derive(Component, Debug)]
pub struct BodySprite;

pub(crate) fn drive_animation(
    time: Res<Time>,
    mut query: Query<(&mut AnimationDriver, &mut AnimationParams, &mut SpeedModifiers)>,
) {
    let dt = time.delta_secs();

    for (mut driver, mut params, mut modifiers) in &mut query {
        let before = driver.state();
        match driver.step(&mut params, dt) {
            Some(AnimationTransition::EnteredRecovery) => modifiers.slow_on_landing(),
            Some(AnimationTransition::LeftRecovery) => modifiers.landing_finished(),
            None => {}
        }
        if driver.state() != before {
            trace!("Animation: {:?} -> {:?}", driver.previous_state(), driver.state());
        }
    }
}

/// Mirror the sprite root's horizontal scale to match facing.
pub(crate) fn sync_facing(
    characters: Query<(&LocomotionState, &Children), Changed<LocomotionState>>,
    mut roots: Query<&mut Transform, With<SpriteRoot>>,
) {
    for (state, children) in &characters {
        for child in children.iter() {
            if let Ok(mut transform) = roots.get_mut(child) {
                transform.scale.x = transform.scale.x.abs() * state.facing.sign();
            }
        }
    }
}

pub(crate) fn tint_body_sprite(
    drivers: Query<&AnimationDriver>,
    mut bodies: Query<(&ChildOf, &mut Sprite), With<BodySprite>>,
    roots: Query<&ChildOf, With<SpriteRoot>>,
) {
    for (child_of, mut sprite) in &mut bodies {
        // Body sprites hang under the sprite root, which hangs under the character.
        let Ok(root_parent) = roots.get(child_of.parent()) else {
            continue;
        };
        let Ok(driver) = drivers.get(root_parent.parent()) else {
            continue;
        };

        sprite.color = match driver.state() {
            AnimationState::Idle | AnimationState::Run => Color::srgb(0.85, 0.87, 0.9),
            AnimationState::Jump => Color::srgb(0.8, 0.85, 0.95),
            AnimationState::JumpRecovery => Color::srgb(0.7, 0.75, 0.8),
            AnimationState::Dash => Color::srgb(0.5, 0.95, 1.0),
            AnimationState::Shield => Color::srgb(0.55, 0.65, 1.0),
            AnimationState::Punch => Color::srgb(1.0, 0.7, 0.4),
        };
    }
}
