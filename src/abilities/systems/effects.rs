//! Abilities domain: ability requests and their effects on the player.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::abilities::{
    AbilityInput, AbilityParts, AbilityPartsChanged, AbilitySet, DashPhase, PartsVisibility,
};
use crate::actions::ActionGate;
use crate::animation::{AnimationDriver, AnimationParams};
use crate::movement::{ControllerDisabled, LocomotionState, Player, SpeedModifiers};

/// Ability timers. The dash's ready indicator comes back with its cooldown.
pub(crate) fn tick_abilities(
    time: Res<Time>,
    mut parts: MessageWriter<AbilityPartsChanged>,
    mut query: Query<(Entity, &mut AbilitySet)>,
) {
    let dt = time.delta_secs();

    for (entity, mut set) in &mut query {
        if set.dash.tick(dt) {
            debug!("Dash ready");
            parts.write(AbilityPartsChanged {
                entity,
                ability: set.dash.config().name.clone(),
                visibility: PartsVisibility::Shown,
            });
        }
        set.shield.tick(dt);
        set.punch.tick(dt);
    }
}

/// Turn button presses into ability starts, each asking the gate itself.
pub(crate) fn request_abilities(
    input: Res<AbilityInput>,
    mut query: Query<
        (
            &mut AbilitySet,
            &mut ActionGate,
            &AnimationDriver,
            &mut AnimationParams,
        ),
        (With<Player>, Without<ControllerDisabled>),
    >,
) {
    for (mut set, mut gate, driver, mut params) in &mut query {
        let state = driver.state();

        if set.dash.try_start(input.dash, &mut gate, state) {
            params.trigger_dash();
            debug!("Dash started from {:?}", state);
        }

        if set.punch.try_punch(input.punch, &mut gate, state) {
            params.trigger_punch();
            debug!("Punch from {:?}", state);
        }

        set.shield.toggle(input.shield, &mut gate, state);
    }
}

/// Mirror the shield's on-state into animation, speed factors and parts.
pub(crate) fn apply_shield_effects(
    mut parts: MessageWriter<AbilityPartsChanged>,
    mut query: Query<(Entity, &AbilitySet, &mut AnimationParams, &mut SpeedModifiers)>,
) {
    for (entity, set, mut params, mut modifiers) in &mut query {
        let on = set.shield.is_on();
        if on == params.shield {
            continue;
        }

        let config = set.shield.config();
        let visibility = if on {
            modifiers.slow_down_movement(&config.name, config.movement_factor, config.duration);
            modifiers.slow_down_jumping(&config.name, config.jump_factor, config.duration);
            PartsVisibility::Shown
        } else {
            modifiers.clear_source(&config.name);
            PartsVisibility::Hidden
        };

        params.shield = on;
        parts.write(AbilityPartsChanged {
            entity,
            ability: config.name.clone(),
            visibility,
        });
    }
}

/// Fixed step, after locomotion: the dash owns horizontal velocity. Its
/// ready indicator hides when the dash starts.
pub(crate) fn apply_dash_velocity(
    time: Res<Time>,
    mut parts: MessageWriter<AbilityPartsChanged>,
    mut query: Query<
        (Entity, &mut AbilitySet, &LocomotionState, &mut LinearVelocity),
        Without<ControllerDisabled>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, mut set, state, mut velocity) in &mut query {
        match set.dash.fixed_tick(&mut velocity.0, state.facing, dt) {
            DashPhase::Started => {
                debug!("Dash: velocity={:?}", velocity.0);
                parts.write(AbilityPartsChanged {
                    entity,
                    ability: set.dash.config().name.clone(),
                    visibility: PartsVisibility::Hidden,
                });
            }
            DashPhase::Ended => debug!("Dash ended"),
            DashPhase::Idle | DashPhase::Dashing => {}
        }
    }
}

pub(crate) fn apply_part_visibility(
    mut changes: MessageReader<AbilityPartsChanged>,
    owners: Query<&AbilityParts>,
    mut visibilities: Query<&mut Visibility>,
) {
    for change in changes.read() {
        let Ok(parts) = owners.get(change.entity) else {
            continue;
        };
        let Some(entities) = parts.parts_for(&change.ability) else {
            warn!("No parts known for ability '{}'", change.ability);
            continue;
        };

        for part in entities {
            if let Ok(mut visibility) = visibilities.get_mut(*part) {
                *visibility = change.visibility.into();
            }
        }
    }
}
