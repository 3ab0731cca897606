//! Movement domain: grounded/airborne locomotion for one character.
//!
//! Engine-free: the Update pass calls [`sample_input`], the fixed pass calls
//! [`fixed_step`] with a [`BodyState`] copied out of the physics engine.
//! Order inside a fixed step:
//! 1. ground check with forgiveness
//! 2. horizontal force (wall prediction, spike stepping)
//! 3. downhill stabilization
//! 4. flip
//! 5. jump impulse or boost
//! 6. contact buckets cleared

use bevy::prelude::*;

use crate::actions::{ActionGate, ActionKind};
use crate::animation::AnimationState;
use crate::movement::{
    Aabb, BodyState, ContactPoint, ContactSample, GroundQuery, LocomotionInput, LocomotionState,
    MovementTuning, SpeedModifiers,
};

/// Below this horizontal speed the body counts as standing still.
const STILL_SPEED: f32 = 0.01;
/// Normals steeper than this (~45°) are ignored when looking for a slope.
const SLOPE_SEARCH_MAX_X: f32 = 0.7;
const SLOPE_MIN_X: f32 = 0.005;
const SLOPE_MAX_X: f32 = 0.95;
/// Extra lift when stepping onto a ledge while grounded.
const GROUNDED_STEP_MARGIN: f32 = 1.05;

/// Speeds and forces after temporary factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveLimits {
    pub max_speed: f32,
    pub jump_force: f32,
    pub jump_boost_force: f32,
}

impl EffectiveLimits {
    pub fn new(tuning: &MovementTuning, modifiers: &SpeedModifiers) -> Self {
        let jump = modifiers.jump_factor();
        Self {
            max_speed: tuning.max_speed * modifiers.movement_factor(tuning.landing_slowness_factor),
            jump_force: tuning.jump_force * jump,
            jump_boost_force: tuning.jump_boost_force * jump,
        }
    }
}

/// Everything a fixed step reads but doesn't own.
pub struct StepEnv<'a, P: GroundQuery + ?Sized> {
    pub tuning: &'a MovementTuning,
    pub limits: EffectiveLimits,
    pub animation: AnimationState,
    pub solids: &'a P,
    pub dt: f32,
}

/// Animation parameters and notable events of a fixed step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepOutput {
    pub in_air: bool,
    pub run: bool,
    pub air_landing_ok: bool,
    pub jumped: bool,
    pub flipped: bool,
}

/// Update pass: latch horizontal input and jump requests, count down the
/// re-jump cooldown. Ground state and the gate are not consulted here.
pub fn sample_input(state: &mut LocomotionState, input: &LocomotionInput, dt: f32) {
    state.horizontal_input = input.horizontal.clamp(-1.0, 1.0);

    if input.jump_pressed && state.jump_timer <= 0.0 {
        state.jump_requested = true;
    } else if input.jump_held && state.jump_boost_timer > 0.0 {
        state.jump_boost_requested = true;
    } else if state.jump_boost_timer > 0.0 {
        // Released: the boost window closes early.
        state.jump_boost_timer = 0.0;
    }

    if state.jump_timer > 0.0 {
        state.jump_timer -= dt;
    }
}

pub fn fixed_step<P: GroundQuery + ?Sized>(
    state: &mut LocomotionState,
    body: &mut BodyState,
    contacts: &mut ContactSample,
    gate: &mut ActionGate,
    env: &StepEnv<'_, P>,
) -> StepOutput {
    let was_grounded = state.grounded;
    state.grounded = check_grounded(state, contacts, env.tuning, env.dt);
    if state.grounded && !was_grounded {
        debug!("Landed: velocity={:?}", body.velocity);
    } else if !state.grounded && was_grounded {
        debug!("Left ground: velocity={:?}", body.velocity);
    }

    apply_movement(state, body, contacts, gate, env);

    if env.tuning.downhill_stabilization {
        stabilize_downhill(state, body, contacts, env.limits.max_speed, env.dt);
    }

    let flipped = handle_flip(state, gate, env.animation);
    let jumped = handle_jump(state, body, gate, env);

    contacts.clear();

    StepOutput {
        in_air: !state.grounded,
        run: state.horizontal_input != 0.0,
        air_landing_ok: state.air_no_landing_timer <= 0.0,
        jumped,
        flipped,
    }
}

/// Ground contact with forgiveness. Losing contact starts a countdown during
/// which the character still counts as grounded, unless a jump boost is in
/// progress.
pub fn check_grounded(
    state: &mut LocomotionState,
    contacts: &ContactSample,
    tuning: &MovementTuning,
    dt: f32,
) -> bool {
    if contacts.touching_ground() {
        state.grounded_timer = tuning.ground_to_air_forgive_time;
        state.air_no_landing_timer = tuning.air_no_landing_time;
        return true;
    }

    let mut on_ground = false;

    if state.jump_boost_timer > 0.0 {
        // Just jumped, no forgiveness.
        state.grounded_timer = 0.0;
        state.air_no_landing_timer = 0.0;
    }

    if state.grounded_timer > 0.0 {
        state.grounded_timer -= dt;
        if state.grounded_timer > 0.0 {
            on_ground = true;
            state.air_no_landing_timer = tuning.air_no_landing_time;
        }
    }

    if !on_ground && state.air_no_landing_timer > 0.0 {
        state.air_no_landing_timer -= dt;
    }

    on_ground
}

/// Force that closes the gap to the target speed within one step. Never
/// brakes a body that is already faster than `max_speed`.
pub fn movement_force(
    state: &LocomotionState,
    body: &BodyState,
    max_speed: f32,
    air_speed_factor: f32,
    dt: f32,
) -> Vec2 {
    if dt <= 0.0 {
        return Vec2::ZERO;
    }

    let target_speed = if state.grounded {
        max_speed
    } else {
        max_speed * air_speed_factor
    };
    let current = body.velocity.x;
    let delta = target_speed * state.facing.sign() - current;

    let mut force = body.mass * delta / dt;
    if (current > max_speed && force < 0.0) || (current < -max_speed && force > 0.0) {
        force = 0.0;
    }

    Vec2::new(force * state.horizontal_input.abs(), 0.0)
}

/// True if applying `force` would push an airborne body into ground geometry.
pub fn predicts_wall_hit<P: GroundQuery + ?Sized>(
    body: &BodyState,
    force: Vec2,
    grounded: bool,
    skin: f32,
    solids: &P,
    dt: f32,
) -> bool {
    if grounded || body.mass <= 0.0 {
        return false;
    }

    let shift = force / body.mass * dt * dt;
    solids.overlaps_ground(body.bounds().translated(shift).shrunk(skin))
}

/// Vertical lift needed to walk over a small ledge, if the wall contacts on
/// the side we're moving towards form one.
pub fn spike_step(
    wall_points: &[ContactPoint],
    bounds: Aabb,
    grounded: bool,
    spike_threshold: f32,
) -> Option<f32> {
    if wall_points.is_empty() {
        return None;
    }

    let mut min_wall = bounds.max.y;
    let mut max_wall = bounds.min.y;
    for contact in wall_points {
        min_wall = min_wall.min(contact.point.y);
        max_wall = max_wall.max(contact.point.y);
    }

    let lift = if min_wall <= bounds.min.y
        && max_wall > min_wall
        && max_wall <= min_wall + spike_threshold
    {
        max_wall - min_wall
    } else if grounded && max_wall <= bounds.min.y + spike_threshold {
        (max_wall - bounds.min.y) * GROUNDED_STEP_MARGIN
    } else {
        return None;
    };

    (lift > 0.0).then_some(lift)
}

fn apply_movement<P: GroundQuery + ?Sized>(
    state: &mut LocomotionState,
    body: &mut BodyState,
    contacts: &ContactSample,
    gate: &mut ActionGate,
    env: &StepEnv<'_, P>,
) {
    if state.horizontal_input == 0.0 || !gate.is_allowed(ActionKind::Move, env.animation) {
        return;
    }

    let force = movement_force(
        state,
        body,
        env.limits.max_speed,
        env.tuning.air_speed_factor,
        env.dt,
    );

    if predicts_wall_hit(
        body,
        force,
        state.grounded,
        env.tuning.wall_skin,
        env.solids,
        env.dt,
    ) {
        return;
    }

    if env.tuning.spike_handling && !state.stabilizing {
        let side = if force.x < 0.0 {
            contacts.left.as_slice()
        } else if force.x > 0.0 {
            contacts.right.as_slice()
        } else {
            &[]
        };

        if let Some(lift) = spike_step(
            side,
            body.bounds(),
            state.grounded,
            env.tuning.spike_threshold,
        ) {
            debug!("Stepping over spike: lift={lift}");
            body.position.y += lift;
        }
    }

    body.apply_force(force, env.dt);
}

/// Repositioning along a shallow slope while walking downhill, or `None` if
/// the body is too fast, too slow, or not on such a slope.
pub fn downhill_correction(
    velocity: Vec2,
    contacts: &ContactSample,
    max_speed: f32,
    dt: f32,
) -> Option<Vec2> {
    let vx = velocity.x;
    if vx.abs() > max_speed || vx.abs() <= STILL_SPEED {
        return None;
    }

    if vx > 0.0 && !contacts.left.is_empty() {
        // The gentler the slope, the larger normal.x.
        let mut normal = Vec2::ZERO;
        for contact in &contacts.left {
            if contact.normal.x > normal.x && normal.x < SLOPE_SEARCH_MAX_X {
                normal = contact.normal;
            }
        }
        if normal.x > SLOPE_MIN_X && normal.x < SLOPE_MAX_X {
            return Some(Vec2::new(
                -vx * normal.x * dt,
                -vx * normal.y * dt + velocity.y * dt,
            ));
        }
    } else if vx < 0.0 && !contacts.right.is_empty() {
        let mut normal = Vec2::ZERO;
        for contact in &contacts.right {
            if contact.normal.x < normal.x && normal.x > -SLOPE_SEARCH_MAX_X {
                normal = contact.normal;
            }
        }
        if normal.x < -SLOPE_MIN_X && normal.x > -SLOPE_MAX_X {
            return Some(Vec2::new(
                vx * normal.x * dt,
                vx * normal.y * dt + velocity.y * dt,
            ));
        }
    }

    None
}

/// Spike handling is suspended while this repositions the body.
pub fn stabilize_downhill(
    state: &mut LocomotionState,
    body: &mut BodyState,
    contacts: &ContactSample,
    max_speed: f32,
    dt: f32,
) {
    match downhill_correction(body.velocity, contacts, max_speed, dt) {
        Some(shift) => {
            state.stabilizing = true;
            body.position += shift;
        }
        None => state.stabilizing = false,
    }
}

pub fn handle_flip(
    state: &mut LocomotionState,
    gate: &mut ActionGate,
    animation: AnimationState,
) -> bool {
    let input = state.horizontal_input;
    let wants_flip = (input > 0.0 && state.facing.sign() < 0.0)
        || (input < 0.0 && state.facing.sign() > 0.0);

    if !wants_flip || !gate.is_allowed(ActionKind::Flip, animation) {
        return false;
    }

    state.facing = state.facing.flipped();
    true
}

/// Jump impulse on a gate-approved grounded request, otherwise the boost
/// force while the button stays held inside the boost window.
pub fn handle_jump<P: GroundQuery + ?Sized>(
    state: &mut LocomotionState,
    body: &mut BodyState,
    gate: &mut ActionGate,
    env: &StepEnv<'_, P>,
) -> bool {
    let mut jumped = false;

    if state.jump_requested
        && state.grounded
        && gate.is_allowed(ActionKind::Jump, env.animation)
    {
        body.apply_impulse(Vec2::new(0.0, env.limits.jump_force));
        state.jump_timer = env.tuning.jump_cooldown;
        state.jump_boost_timer = env.tuning.jump_boost_time;
        jumped = true;
        debug!("Jump: impulse={}", env.limits.jump_force);
    } else if state.jump_boost_requested {
        body.apply_force(Vec2::new(0.0, env.limits.jump_boost_force), env.dt);
        state.jump_boost_requested = false;
        state.jump_boost_timer -= env.dt;
    }

    state.jump_requested = false;
    jumped
}
