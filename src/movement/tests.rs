//! Movement domain: tests for grounding, forces, and ledge handling.

use bevy::prelude::{ButtonInput, KeyCode, Vec2};

use super::{
    check_grounded, downhill_correction, fixed_step, handle_flip, movement_force,
    predicts_wall_hit, sample_input, spike_step, Aabb, BodyState, ContactPoint, ContactSample,
    EffectiveLimits, Facing, LocomotionInput, LocomotionState, MovementTuning, SpeedModifiers,
    StepEnv,
};
use crate::actions::ActionGate;
use crate::animation::AnimationState;

const DT: f32 = 0.0625;

fn body_at(position: Vec2) -> BodyState {
    BodyState {
        position,
        velocity: Vec2::ZERO,
        mass: 1.0,
        half_extents: Vec2::new(12.0, 24.0),
    }
}

fn floor_contact(x: f32, y: f32) -> ContactPoint {
    ContactPoint {
        point: Vec2::new(x, y),
        normal: Vec2::Y,
        ground_layer: true,
    }
}

fn standing_on_floor() -> ContactSample {
    let mut contacts = ContactSample::default();
    contacts.collect([floor_contact(0.0, 0.0)], 0.0, 3.0);
    contacts
}

fn airborne_state(tuning: &MovementTuning) -> LocomotionState {
    let mut state = LocomotionState::new(tuning);
    state.grounded_timer = 0.0;
    state
}

// -----------------------------------------------------------------------------
// Contact buckets
// -----------------------------------------------------------------------------

#[test]
fn test_contacts_partition_by_normal_and_height() {
    let mut contacts = ContactSample::default();
    contacts.collect(
        [
            floor_contact(0.0, 0.0),
            ContactPoint {
                point: Vec2::new(-12.0, 20.0),
                normal: Vec2::X,
                ground_layer: true,
            },
            ContactPoint {
                point: Vec2::new(5.0, 1.0),
                normal: Vec2::new(-0.5, 0.866),
                ground_layer: true,
            },
        ],
        0.0,
        3.0,
    );

    assert_eq!(contacts.left.len(), 1);
    assert_eq!(contacts.right.len(), 1);
    // The slope point counts as both a side and a bottom contact.
    assert_eq!(contacts.bottom.len(), 2);
    assert!(contacts.touching_ground());

    contacts.clear();
    assert!(contacts.is_empty());
}

#[test]
fn test_steep_or_foreign_bottom_contacts_are_not_ground() {
    let mut steep = ContactSample::default();
    steep.collect(
        [ContactPoint {
            point: Vec2::new(0.0, 0.0),
            normal: Vec2::new(-0.9, 0.43),
            ground_layer: true,
        }],
        0.0,
        3.0,
    );
    assert!(!steep.touching_ground());

    let mut foreign = ContactSample::default();
    foreign.collect(
        [ContactPoint {
            ground_layer: false,
            ..floor_contact(0.0, 0.0)
        }],
        0.0,
        3.0,
    );
    assert!(!foreign.touching_ground());
}

// -----------------------------------------------------------------------------
// Ground forgiveness
// -----------------------------------------------------------------------------

#[test]
fn test_grounded_forgiveness_window() {
    let tuning = MovementTuning {
        ground_to_air_forgive_time: 0.25,
        air_no_landing_time: 0.125,
        ..Default::default()
    };
    let mut state = LocomotionState::new(&tuning);

    assert!(check_grounded(&mut state, &standing_on_floor(), &tuning, DT));

    let nothing = ContactSample::default();
    for tick in 0..3 {
        assert!(
            check_grounded(&mut state, &nothing, &tuning, DT),
            "still grounded on tick {tick}"
        );
    }
    assert!(!check_grounded(&mut state, &nothing, &tuning, DT));
}

#[test]
fn test_jump_boost_cancels_forgiveness() {
    let tuning = MovementTuning::default();
    let mut state = LocomotionState::new(&tuning);
    assert!(check_grounded(&mut state, &standing_on_floor(), &tuning, DT));

    state.jump_boost_timer = tuning.jump_boost_time;
    assert!(!check_grounded(
        &mut state,
        &ContactSample::default(),
        &tuning,
        DT
    ));
    assert_eq!(state.grounded_timer, 0.0);
}

#[test]
fn test_air_landing_timer_runs_out_in_the_air() {
    let tuning = MovementTuning {
        ground_to_air_forgive_time: 0.0625,
        air_no_landing_time: 0.125,
        ..Default::default()
    };
    let mut state = LocomotionState::new(&tuning);
    check_grounded(&mut state, &standing_on_floor(), &tuning, DT);

    let nothing = ContactSample::default();
    check_grounded(&mut state, &nothing, &tuning, DT);
    assert!(state.air_no_landing_timer > 0.0);
    check_grounded(&mut state, &nothing, &tuning, DT);
    assert!(state.air_no_landing_timer <= 0.0);
}

// -----------------------------------------------------------------------------
// Horizontal force
// -----------------------------------------------------------------------------

#[test]
fn test_speed_converges_without_overshoot() {
    let mut state = LocomotionState::default();
    state.grounded = true;
    state.horizontal_input = 1.0;
    let mut body = body_at(Vec2::ZERO);
    let dt = 0.02;

    for _ in 0..10 {
        let force = movement_force(&state, &body, 5.0, 0.7, dt);
        body.apply_force(force, dt);
        assert!(body.velocity.x <= 5.0 + 1e-4);
    }
    assert!((body.velocity.x - 5.0).abs() < 1e-4);
}

#[test]
fn test_no_braking_above_max_speed() {
    let mut state = LocomotionState::default();
    state.grounded = true;
    state.horizontal_input = 1.0;
    let mut body = body_at(Vec2::ZERO);
    body.velocity.x = 8.0;

    assert_eq!(movement_force(&state, &body, 5.0, 0.7, 0.02), Vec2::ZERO);

    body.velocity.x = -8.0;
    state.facing = Facing::Left;
    assert_eq!(movement_force(&state, &body, 5.0, 0.7, 0.02), Vec2::ZERO);
}

#[test]
fn test_airborne_guard_uses_max_speed_not_air_target() {
    let mut state = LocomotionState::default();
    state.horizontal_input = 1.0;
    let mut body = body_at(Vec2::ZERO);

    // Between the air target (3.5) and max speed: pulled down to the target.
    body.velocity.x = 4.5;
    let force = movement_force(&state, &body, 5.0, 0.7, 0.1);
    assert!((force.x + 10.0).abs() < 1e-3);

    body.velocity.x = 6.0;
    assert_eq!(movement_force(&state, &body, 5.0, 0.7, 0.1), Vec2::ZERO);
}

#[test]
fn test_air_factor_and_input_magnitude_scale_force() {
    let mut state = LocomotionState::default();
    state.horizontal_input = 1.0;
    let body = body_at(Vec2::ZERO);

    let force = movement_force(&state, &body, 10.0, 0.5, 0.1);
    assert!((force.x - 50.0).abs() < 1e-3);

    state.grounded = true;
    state.facing = Facing::Left;
    state.horizontal_input = -0.5;
    let heavy = BodyState { mass: 2.0, ..body };
    let force = movement_force(&state, &heavy, 4.0, 0.5, 0.5);
    assert!((force.x + 8.0).abs() < 1e-3);
}

#[test]
fn test_wall_hit_prediction_only_in_the_air() {
    let body = body_at(Vec2::new(0.0, 100.0));
    let walls = [Aabb {
        min: Vec2::new(12.2, 0.0),
        max: Vec2::new(50.0, 200.0),
    }];
    let force = Vec2::new(224.0 * 64.0, 0.0);

    assert!(predicts_wall_hit(&body, force, false, 0.5, &walls[..], 1.0 / 64.0));
    assert!(!predicts_wall_hit(&body, force, true, 0.5, &walls[..], 1.0 / 64.0));
    assert!(!predicts_wall_hit(&body, -force, false, 0.5, &walls[..], 1.0 / 64.0));
}

#[test]
fn test_airborne_push_into_wall_is_suppressed() {
    let tuning = MovementTuning::default();
    let walls = [Aabb {
        min: Vec2::new(12.2, 0.0),
        max: Vec2::new(50.0, 200.0),
    }];
    let open: [Aabb; 0] = [];

    for (solids, expect_moving) in [(&walls[..], false), (&open[..], true)] {
        let mut state = airborne_state(&tuning);
        state.horizontal_input = 1.0;
        let mut body = body_at(Vec2::new(0.0, 100.0));
        let env = StepEnv {
            tuning: &tuning,
            limits: EffectiveLimits::new(&tuning, &SpeedModifiers::default()),
            animation: AnimationState::Jump,
            solids,
            dt: 1.0 / 64.0,
        };

        fixed_step(
            &mut state,
            &mut body,
            &mut ContactSample::default(),
            &mut ActionGate::default(),
            &env,
        );
        assert_eq!(body.velocity.x > 0.0, expect_moving);
    }
}

#[test]
fn test_move_refused_while_dashing() {
    let tuning = MovementTuning::default();
    let open: [Aabb; 0] = [];
    let mut state = LocomotionState::default();
    state.horizontal_input = 1.0;
    let mut body = body_at(Vec2::new(0.0, 24.0));
    let env = StepEnv {
        tuning: &tuning,
        limits: EffectiveLimits::new(&tuning, &SpeedModifiers::default()),
        animation: AnimationState::Dash,
        solids: &open[..],
        dt: DT,
    };

    fixed_step(
        &mut state,
        &mut body,
        &mut standing_on_floor(),
        &mut ActionGate::default(),
        &env,
    );
    assert_eq!(body.velocity.x, 0.0);
}

// -----------------------------------------------------------------------------
// Ledges and slopes
// -----------------------------------------------------------------------------

#[test]
fn test_spike_step_lifts_over_small_ledge() {
    let bounds = Aabb::from_center(Vec2::new(0.0, 24.0), Vec2::new(12.0, 24.0));
    let ledge = [floor_contact(12.0, 0.0), floor_contact(12.0, 10.0)];

    let lift = spike_step(&ledge, bounds, false, 19.0);
    assert_eq!(lift, Some(10.0));
}

#[test]
fn test_spike_step_ignores_tall_walls_and_empty_sides() {
    let bounds = Aabb::from_center(Vec2::new(0.0, 24.0), Vec2::new(12.0, 24.0));
    let wall = [floor_contact(12.0, 0.0), floor_contact(12.0, 30.0)];

    assert_eq!(spike_step(&wall, bounds, false, 19.0), None);
    assert_eq!(spike_step(&[], bounds, true, 19.0), None);
}

#[test]
fn test_spike_step_grounded_adds_margin() {
    let bounds = Aabb::from_center(Vec2::new(0.0, 24.0), Vec2::new(12.0, 24.0));
    let ledge = [floor_contact(12.0, 8.0)];

    let lift = spike_step(&ledge, bounds, true, 19.0).unwrap_or_default();
    assert!((lift - 8.4).abs() < 1e-4);
    assert_eq!(spike_step(&ledge, bounds, false, 19.0), None);
}

#[test]
fn test_downhill_correction_follows_gentle_slope() {
    let mut contacts = ContactSample::default();
    contacts.left.push(ContactPoint {
        point: Vec2::new(-12.0, 0.0),
        normal: Vec2::new(0.5, 0.866),
        ground_layer: true,
    });

    let shift = downhill_correction(Vec2::new(100.0, 0.0), &contacts, 320.0, 0.1);
    let shift = shift.unwrap_or(Vec2::ZERO);
    assert!((shift.x + 5.0).abs() < 1e-3);
    assert!((shift.y + 8.66).abs() < 1e-3);

    assert_eq!(
        downhill_correction(Vec2::new(400.0, 0.0), &contacts, 320.0, 0.1),
        None
    );
    assert_eq!(
        downhill_correction(Vec2::new(0.005, 0.0), &contacts, 320.0, 0.1),
        None
    );
}

#[test]
fn test_downhill_correction_skips_near_vertical_walls() {
    let mut contacts = ContactSample::default();
    contacts.left.push(ContactPoint {
        point: Vec2::new(-12.0, 10.0),
        normal: Vec2::new(0.99, 0.14),
        ground_layer: true,
    });

    assert_eq!(
        downhill_correction(Vec2::new(100.0, 0.0), &contacts, 320.0, 0.1),
        None
    );
}

// -----------------------------------------------------------------------------
// Flip and jump
// -----------------------------------------------------------------------------

#[test]
fn test_flip_follows_input_when_permitted() {
    let mut state = LocomotionState::default();
    let mut gate = ActionGate::default();
    state.horizontal_input = -1.0;

    assert!(!handle_flip(&mut state, &mut gate, AnimationState::Punch));
    assert_eq!(state.facing, Facing::Right);

    assert!(handle_flip(&mut state, &mut gate, AnimationState::Run));
    assert_eq!(state.facing, Facing::Left);
    assert!(!handle_flip(&mut state, &mut gate, AnimationState::Run));
}

#[test]
fn test_jump_impulse_then_boost() {
    let tuning = MovementTuning::default();
    let open: [Aabb; 0] = [];
    let mut state = LocomotionState::new(&tuning);
    let mut gate = ActionGate::default();
    let mut body = body_at(Vec2::new(0.0, 24.0));
    let env = StepEnv {
        tuning: &tuning,
        limits: EffectiveLimits::new(&tuning, &SpeedModifiers::default()),
        animation: AnimationState::Idle,
        solids: &open[..],
        dt: DT,
    };

    state.jump_requested = true;
    let output = fixed_step(&mut state, &mut body, &mut standing_on_floor(), &mut gate, &env);
    assert!(output.jumped);
    assert_eq!(body.velocity.y, 560.0);
    assert_eq!(state.jump_timer, tuning.jump_cooldown);
    assert!(gate.is_latched());

    state.jump_boost_requested = true;
    let output = fixed_step(
        &mut state,
        &mut body,
        &mut ContactSample::default(),
        &mut gate,
        &env,
    );
    assert!(output.in_air);
    assert!(!output.jumped);
    assert_eq!(body.velocity.y, 647.5);
    assert!(!state.jump_boost_requested);
}

#[test]
fn test_refused_jump_clears_request() {
    let tuning = MovementTuning::default();
    let open: [Aabb; 0] = [];
    let mut state = LocomotionState::new(&tuning);
    let mut body = body_at(Vec2::new(0.0, 24.0));
    let env = StepEnv {
        tuning: &tuning,
        limits: EffectiveLimits::new(&tuning, &SpeedModifiers::default()),
        animation: AnimationState::Dash,
        solids: &open[..],
        dt: DT,
    };

    state.jump_requested = true;
    let output = fixed_step(
        &mut state,
        &mut body,
        &mut standing_on_floor(),
        &mut ActionGate::default(),
        &env,
    );
    assert!(!output.jumped);
    assert!(!state.jump_requested);
    assert_eq!(body.velocity.y, 0.0);
}

#[test]
fn test_keys_map_to_horizontal_axis_and_jump() {
    let mut keys = ButtonInput::<KeyCode>::default();
    assert_eq!(LocomotionInput::from_keys(&keys), LocomotionInput::default());

    keys.press(KeyCode::ArrowLeft);
    keys.press(KeyCode::Space);
    let input = LocomotionInput::from_keys(&keys);
    assert_eq!(input.horizontal, -1.0);
    assert!(input.jump_pressed);
    assert!(input.jump_held);

    keys.clear();
    keys.press(KeyCode::KeyD);
    let input = LocomotionInput::from_keys(&keys);
    assert_eq!(input.horizontal, 0.0);
    assert!(!input.jump_pressed);
    assert!(input.jump_held);

    keys.release(KeyCode::ArrowLeft);
    assert_eq!(LocomotionInput::from_keys(&keys).horizontal, 1.0);
}

#[test]
fn test_sample_input_respects_cooldown_and_release() {
    let mut state = LocomotionState::default();
    let press = LocomotionInput {
        jump_pressed: true,
        jump_held: true,
        ..Default::default()
    };

    state.jump_timer = 0.1;
    sample_input(&mut state, &press, DT);
    assert!(!state.jump_requested);

    state.jump_timer = 0.0;
    sample_input(&mut state, &press, DT);
    assert!(state.jump_requested);

    state.jump_boost_timer = 0.2;
    sample_input(&mut state, &LocomotionInput::default(), DT);
    assert_eq!(state.jump_boost_timer, 0.0);
    assert!(!state.jump_boost_requested);
}

// -----------------------------------------------------------------------------
// Speed modifiers
// -----------------------------------------------------------------------------

#[test]
fn test_speed_modifiers_stack_and_expire() {
    let mut modifiers = SpeedModifiers::default();
    modifiers.slow_down_movement("mud", 0.5, 1.0);
    modifiers.slow_down_movement("mud", 0.5, 2.0);
    assert_eq!(modifiers.movement_factor(0.2), 0.25);

    modifiers.tick(1.5);
    assert_eq!(modifiers.movement_factor(0.2), 0.5);
    modifiers.tick(1.0);
    assert_eq!(modifiers.movement_factor(0.2), 1.0);
}

#[test]
fn test_speed_modifier_requests_are_clamped() {
    let mut modifiers = SpeedModifiers::default();
    modifiers.slow_down_jumping("mud", 0.0, 1000.0);
    assert_eq!(modifiers.jump_factor(), 0.001);

    modifiers.tick(59.0);
    assert_eq!(modifiers.jump_factor(), 0.001);
    modifiers.tick(2.0);
    assert_eq!(modifiers.jump_factor(), 1.0);
}

#[test]
fn test_landing_slowdown_and_effective_limits() {
    let tuning = MovementTuning::default();
    let mut modifiers = SpeedModifiers::default();
    modifiers.slow_on_landing();
    modifiers.slow_down_jumping("Shield", 0.5, 1.0);

    let limits = EffectiveLimits::new(&tuning, &modifiers);
    assert!((limits.max_speed - 256.0).abs() < 1e-3);
    assert_eq!(limits.jump_force, 280.0);
    assert_eq!(limits.jump_boost_force, 700.0);

    modifiers.landing_finished();
    modifiers.clear_source("Shield");
    let limits = EffectiveLimits::new(&tuning, &modifiers);
    assert_eq!(limits.max_speed, 320.0);
    assert_eq!(limits.jump_force, 560.0);
}

#[test]
fn test_clearing_a_source_keeps_other_factors() {
    let mut modifiers = SpeedModifiers::default();
    modifiers.slow_down_movement("Shield", 0.5, 1.0);
    modifiers.slow_down_jumping("Shield", 0.5, 1.0);
    modifiers.slow_down_movement("mud", 0.8, 3.0);
    modifiers.slow_on_landing();

    modifiers.clear_source("Shield");
    assert!((modifiers.movement_factor(0.2) - 0.64).abs() < 1e-6);
    assert_eq!(modifiers.jump_factor(), 1.0);

    modifiers.landing_finished();
    assert!((modifiers.movement_factor(0.2) - 0.8).abs() < 1e-6);
}
