//! Movement domain: locomotion systems bridging the physics engine.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::actions::ActionGate;
use crate::animation::{AnimationDriver, AnimationParams};
use crate::movement::{
    fixed_step, sample_input, Aabb, BodyState, ContactSample, ControllerDisabled,
    EffectiveLimits, GameLayer, GroundQuery, LocomotionState, LocomotionInput, MovementTuning,
    Player, SpeedModifiers, StepEnv,
};

/// Ground overlap test backed by the physics world.
struct SpatialGroundQuery<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    filter: SpatialQueryFilter,
}

impl GroundQuery for SpatialGroundQuery<'_, '_, '_> {
    fn overlaps_ground(&self, area: Aabb) -> bool {
        let size = area.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return false;
        }

        let shape = Collider::rectangle(size.x, size.y);
        !self
            .spatial_query
            .shape_intersections(&shape, area.center(), 0.0, &self.filter)
            .is_empty()
    }
}

pub(crate) fn sample_locomotion_input(
    time: Res<Time>,
    input: Res<LocomotionInput>,
    mut query: Query<&mut LocomotionState, (With<Player>, Without<ControllerDisabled>)>,
) {
    let dt = time.delta_secs();

    for mut state in &mut query {
        sample_input(&mut state, &input, dt);
    }
}

pub(crate) fn tick_speed_modifiers(time: Res<Time>, mut query: Query<&mut SpeedModifiers>) {
    let dt = time.delta_secs();

    for mut modifiers in &mut query {
        modifiers.tick(dt);
    }
}

pub(crate) fn run_locomotion(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    spatial_query: SpatialQuery,
    mut query: Query<
        (
            &mut LocomotionState,
            &mut ContactSample,
            &mut ActionGate,
            &mut AnimationParams,
            &AnimationDriver,
            &SpeedModifiers,
            &mut Position,
            &mut LinearVelocity,
        ),
        (With<Player>, Without<ControllerDisabled>),
    >,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    let solids = SpatialGroundQuery {
        spatial_query: &spatial_query,
        filter: SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Wall]),
    };

    for (
        mut state,
        mut contacts,
        mut gate,
        mut params,
        driver,
        modifiers,
        mut position,
        mut velocity,
    ) in &mut query
    {
        let mut body = BodyState {
            position: position.0,
            velocity: velocity.0,
            mass: tuning.mass,
            half_extents: tuning.half_extents(),
        };
        let env = StepEnv {
            tuning: &tuning,
            limits: EffectiveLimits::new(&tuning, modifiers),
            animation: driver.state(),
            solids: &solids,
            dt,
        };

        let output = fixed_step(&mut state, &mut body, &mut contacts, &mut gate, &env);

        if body.position != position.0 {
            position.0 = body.position;
        }
        velocity.0 = body.velocity;

        params.in_air = output.in_air;
        params.run = output.run;
        params.air_landing_ok = output.air_landing_ok;
    }
}

/// A player missing any part of the controller wiring is disabled instead of
/// running half-configured.
pub(crate) fn validate_player_wiring(
    mut commands: Commands,
    query: Query<
        (
            Entity,
            Has<LocomotionState>,
            Has<ContactSample>,
            Has<ActionGate>,
            Has<AnimationDriver>,
            Has<AnimationParams>,
            Has<RigidBody>,
            Has<Collider>,
            Has<LinearVelocity>,
        ),
        (Added<Player>, Without<ControllerDisabled>),
    >,
) {
    for (entity, locomotion, contacts, gate, driver, params, body, collider, velocity) in &query {
        let missing: Vec<&str> = [
            (locomotion, "LocomotionState"),
            (contacts, "ContactSample"),
            (gate, "ActionGate"),
            (driver, "AnimationDriver"),
            (params, "AnimationParams"),
            (body, "RigidBody"),
            (collider, "Collider"),
            (velocity, "LinearVelocity"),
        ]
        .into_iter()
        .filter_map(|(present, name)| (!present).then_some(name))
        .collect();

        if !missing.is_empty() {
            error!(
                "Player {:?} is missing {}; controller disabled",
                entity,
                missing.join(", ")
            );
            commands.entity(entity).insert(ControllerDisabled);
        }
    }
}
