//! Abilities domain: tests for the roster, ability timers and parts.

use std::collections::HashMap;
use std::time::Duration;

use avian2d::prelude::{CollisionStart, LinearVelocity};
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::systems::{
    apply_dash_velocity, reconcile_triggers, tick_abilities, unlock_on_trigger_contact,
};
use super::{
    index_player_parts, AbilityChanged, AbilityKind, AbilityParts, AbilityPartsChanged,
    AbilityPartsDef, AbilityRoster, AbilitySet, AbilityTrigger, Dash, DashConfig, DashPhase,
    PartError, PartsVisibility, Punch, PunchConfig, RosterChange, RosterError, Shield,
    ShieldConfig, ShieldOff, TriggerSpent,
};
use crate::actions::{ActionGate, ActionKind};
use crate::animation::AnimationState;
use crate::movement::{Facing, LocomotionState, MovementTuning, Player};

const DT: f32 = 0.0625;

fn default_set() -> AbilitySet {
    let (set, errors) = AbilitySet::new(
        DashConfig::default(),
        ShieldConfig::default(),
        PunchConfig::default(),
    );
    assert!(errors.is_empty());
    set
}

fn granted_shield(config: ShieldConfig) -> Shield {
    let mut shield = Shield::new(config);
    shield.grant();
    shield
}

fn entities(count: usize) -> Vec<Entity> {
    let mut world = World::new();
    (0..count).map(|_| world.spawn_empty().id()).collect()
}

// -----------------------------------------------------------------------------
// Roster
// -----------------------------------------------------------------------------

#[test]
fn test_registered_abilities_start_disabled() {
    let set = default_set();
    assert_eq!(set.roster().len(), 3);
    assert!(set.enabled_names().is_empty());
    assert_eq!(
        set.roster().disabled_names(),
        vec!["Dash".to_string(), "Punch".to_string(), "Shield".to_string()]
    );
}

#[test]
fn test_register_rejects_empty_and_duplicate_names() {
    let mut roster = AbilityRoster::default();
    assert_eq!(
        roster.register("", AbilityKind::Dash),
        Err(RosterError::EmptyName)
    );
    assert!(roster.register("Dash", AbilityKind::Dash).is_ok());
    assert_eq!(
        roster.register("Dash", AbilityKind::Punch),
        Err(RosterError::Duplicate("Dash".to_string()))
    );
    assert_eq!(roster.len(), 1);
}

#[test]
fn test_shared_config_names_are_reported() {
    let (set, errors) = AbilitySet::new(
        DashConfig::default(),
        ShieldConfig {
            name: "Dash".to_string(),
            ..Default::default()
        },
        PunchConfig::default(),
    );
    assert_eq!(errors, vec![RosterError::Duplicate("Dash".to_string())]);
    assert_eq!(set.roster().len(), 2);
}

#[test]
fn test_enable_twice_does_not_duplicate() {
    let mut roster = AbilityRoster::default();
    roster.register("Dash", AbilityKind::Dash).unwrap();

    assert_eq!(roster.enable("Dash"), Ok(RosterChange::Moved(AbilityKind::Dash)));
    assert_eq!(
        roster.enable("Dash"),
        Ok(RosterChange::Unchanged(AbilityKind::Dash))
    );
    assert_eq!(roster.enabled_names(), vec!["Dash".to_string()]);
    assert!(roster.disabled_names().is_empty());
}

#[test]
fn test_disable_twice_is_a_no_op() {
    let mut roster = AbilityRoster::default();
    roster.register("Shield", AbilityKind::Shield).unwrap();
    roster.enable("Shield").unwrap();

    assert_eq!(
        roster.disable("Shield"),
        Ok(RosterChange::Moved(AbilityKind::Shield))
    );
    assert_eq!(
        roster.disable("Shield"),
        Ok(RosterChange::Unchanged(AbilityKind::Shield))
    );
    assert_eq!(roster.disabled_names(), vec!["Shield".to_string()]);
}

#[test]
fn test_unknown_ability_is_an_error() {
    let mut set = default_set();
    assert_eq!(
        set.enable("Laser"),
        Err(RosterError::Unknown("Laser".to_string()))
    );
    assert_eq!(
        set.disable("Laser"),
        Err(RosterError::Unknown("Laser".to_string()))
    );
}

#[test]
fn test_enable_flips_has_ability_and_reports_parts() {
    let mut set = default_set();

    let change = set.enable("Punch").unwrap().unwrap();
    assert_eq!(change.kind, AbilityKind::Punch);
    assert!(change.enabled);
    assert_eq!(change.parts, Some(PartsVisibility::Shown));
    assert!(set.punch.has_ability());
    assert!(set.enable("Punch").unwrap().is_none());

    let change = set.enable("Dash").unwrap().unwrap();
    assert_eq!(change.parts, Some(PartsVisibility::Shown));
    assert!(set.dash.has_ability());

    let change = set.disable("Dash").unwrap().unwrap();
    assert!(!change.enabled);
    assert_eq!(change.parts, Some(PartsVisibility::Hidden));
    assert!(!set.dash.has_ability());
}

#[test]
fn test_restore_matches_saved_names() {
    let mut set = default_set();
    set.enable("Dash").unwrap();
    set.enable("Punch").unwrap();

    let (changes, errors) = set.restore(&["Shield".to_string(), "Dash".to_string()]);
    assert!(errors.is_empty());
    assert_eq!(changes.len(), 2);
    assert_eq!(
        set.enabled_names(),
        vec!["Dash".to_string(), "Shield".to_string()]
    );
    assert!(!set.punch.has_ability());
    assert!(set.shield.has_ability());

    let (_, errors) = set.restore(&["Laser".to_string()]);
    assert_eq!(errors, vec![RosterError::Unknown("Laser".to_string())]);
    assert!(set.enabled_names().is_empty());
}

// -----------------------------------------------------------------------------
// Dash
// -----------------------------------------------------------------------------

#[test]
fn test_dash_overrides_velocity_then_cools_down() {
    let mut dash = Dash::new(DashConfig {
        dash_time: 0.2,
        dash_velocity: 30.0,
        cooldown: 5.0,
        ..Default::default()
    });
    dash.grant();

    assert!(dash.try_start(true, &mut ActionGate::default(), AnimationState::Run));

    let mut velocity = Vec2::new(3.0, -4.0);
    let phases: Vec<DashPhase> = (0..3)
        .map(|_| {
            let phase = dash.fixed_tick(&mut velocity, Facing::Right, DT);
            assert_eq!(velocity, Vec2::new(30.0, -4.0));
            phase
        })
        .collect();
    assert_eq!(
        phases,
        vec![DashPhase::Started, DashPhase::Dashing, DashPhase::Dashing]
    );

    assert_eq!(
        dash.fixed_tick(&mut velocity, Facing::Right, DT),
        DashPhase::Ended
    );
    assert_eq!(velocity, Vec2::new(0.0, -4.0));
    assert_eq!(
        dash.fixed_tick(&mut velocity, Facing::Right, DT),
        DashPhase::Idle
    );

    assert!(!dash.try_start(true, &mut ActionGate::default(), AnimationState::Run));
    assert!(!dash.tick(4.9));
    assert!(!dash.try_start(true, &mut ActionGate::default(), AnimationState::Run));
    assert!(dash.tick(0.2));
    assert!(!dash.tick(0.2));
    assert!(dash.try_start(true, &mut ActionGate::default(), AnimationState::Run));
}

#[test]
fn test_dash_follows_facing() {
    let mut dash = Dash::new(DashConfig {
        dash_velocity: 30.0,
        end_kick: 5.0,
        ..Default::default()
    });
    dash.grant();
    dash.try_start(true, &mut ActionGate::default(), AnimationState::Idle);

    let mut velocity = Vec2::ZERO;
    dash.fixed_tick(&mut velocity, Facing::Left, DT);
    assert_eq!(velocity.x, -30.0);

    while dash.fixed_tick(&mut velocity, Facing::Left, DT) != DashPhase::Ended {}
    assert_eq!(velocity.x, -5.0);
}

#[test]
fn test_dash_refusals_leave_gate_unlatched() {
    let mut gate = ActionGate::default();
    let mut dash = Dash::new(DashConfig::default());

    assert!(!dash.try_start(true, &mut gate, AnimationState::Idle));
    dash.grant();
    assert!(!dash.try_start(false, &mut gate, AnimationState::Idle));
    assert!(!dash.try_start(true, &mut gate, AnimationState::Punch));
    assert!(!gate.is_latched());

    let mut velocity = Vec2::ZERO;
    assert_eq!(dash.fixed_tick(&mut velocity, Facing::Right, DT), DashPhase::Idle);
}

#[test]
fn test_dash_and_punch_share_one_latch_window() {
    let mut set = default_set();
    set.enable("Dash").unwrap();
    set.enable("Punch").unwrap();
    let mut gate = ActionGate::default();

    assert!(set.dash.try_start(true, &mut gate, AnimationState::Run));
    assert!(!set.punch.try_punch(true, &mut gate, AnimationState::Run));
    assert!(!gate.is_allowed(ActionKind::Jump, AnimationState::Run));

    gate.end_frame();
    gate.end_frame();
    assert!(set.punch.try_punch(true, &mut gate, AnimationState::Run));
}

// -----------------------------------------------------------------------------
// Shield
// -----------------------------------------------------------------------------

#[test]
fn test_shield_ignores_non_positive_damage() {
    let mut shield = granted_shield(ShieldConfig {
        strength: 3,
        ..Default::default()
    });
    shield.toggle(true, &mut ActionGate::default(), AnimationState::Idle);

    for damage in [0, -1, -10] {
        assert_eq!(shield.hit(damage), 0);
        assert_eq!(shield.strength(), 3);
    }
    assert!(shield.is_on());
}

#[test]
fn test_shield_absorbs_up_to_capacity() {
    for strength in 1..=5 {
        for damage in 1..=6 {
            let mut shield = granted_shield(ShieldConfig {
                strength,
                ..Default::default()
            });
            assert_eq!(
                shield.toggle(true, &mut ActionGate::default(), AnimationState::Idle),
                Some(true)
            );

            assert_eq!(shield.hit(damage), (damage - strength).max(0));
            assert_eq!(shield.strength(), (strength - damage).max(0));
            assert_eq!(shield.is_on(), strength > damage);
        }
    }
}

#[test]
fn test_shield_without_ability_or_off_passes_damage() {
    let mut shield = Shield::new(ShieldConfig::default());
    assert_eq!(shield.hit(2), 2);

    shield.grant();
    assert_eq!(shield.hit(2), 2);
}

#[test]
fn test_forgiveness_absorbs_one_hit_after_toggle_off() {
    let mut shield = granted_shield(ShieldConfig {
        strength: 3,
        ..Default::default()
    });
    let mut gate = ActionGate::default();

    shield.toggle(true, &mut gate, AnimationState::Idle);
    assert_eq!(shield.toggle(true, &mut gate, AnimationState::Idle), Some(false));
    assert!(shield.in_forgiveness());

    assert_eq!(shield.hit(2), 0);
    assert_eq!(shield.strength(), 1);
    assert_eq!(shield.hit(2), 2);
}

#[test]
fn test_broken_shield_has_no_forgiveness() {
    let mut shield = granted_shield(ShieldConfig::default());
    shield.toggle(true, &mut ActionGate::default(), AnimationState::Idle);

    assert_eq!(shield.hit(1), 0);
    assert!(!shield.is_on());
    assert!(!shield.in_forgiveness());
    assert_eq!(shield.hit(1), 1);
}

#[test]
fn test_forgiveness_window_expires() {
    let mut shield = granted_shield(ShieldConfig {
        strength: 2,
        forgiveness_time: 0.2,
        ..Default::default()
    });
    let mut gate = ActionGate::default();
    shield.toggle(true, &mut gate, AnimationState::Idle);
    shield.toggle(true, &mut gate, AnimationState::Idle);

    shield.tick(0.25);
    assert_eq!(shield.hit(1), 1);
}

#[test]
fn test_shield_expires_after_duration() {
    let mut shield = granted_shield(ShieldConfig {
        duration: 0.25,
        ..Default::default()
    });
    shield.toggle(true, &mut ActionGate::default(), AnimationState::Idle);

    for _ in 0..3 {
        assert_eq!(shield.tick(DT), None);
    }
    assert_eq!(shield.tick(DT), Some(ShieldOff::Expired));
    assert!(!shield.is_on());
}

#[test]
fn test_shield_turn_on_needs_cooldown_and_gate() {
    let mut shield = granted_shield(ShieldConfig {
        cooldown: 1.0,
        ..Default::default()
    });
    let mut gate = ActionGate::default();

    assert!(gate.is_allowed(ActionKind::Jump, AnimationState::Idle));
    assert_eq!(shield.toggle(true, &mut gate, AnimationState::Idle), None);
    gate.end_frame();
    gate.end_frame();

    assert_eq!(shield.toggle(true, &mut gate, AnimationState::Idle), Some(true));
    // Turning off ignores the latch.
    assert_eq!(shield.toggle(true, &mut gate, AnimationState::Idle), Some(false));

    gate.end_frame();
    gate.end_frame();
    assert_eq!(shield.toggle(true, &mut gate, AnimationState::Idle), None);
    shield.tick(1.0);
    shield.tick(DT);
    assert_eq!(shield.toggle(true, &mut gate, AnimationState::Idle), Some(true));
}

// -----------------------------------------------------------------------------
// Punch
// -----------------------------------------------------------------------------

#[test]
fn test_punch_cooldown_and_grounded_states() {
    let mut punch = Punch::new(PunchConfig {
        cooldown: 0.25,
        ..Default::default()
    });
    punch.grant();

    assert!(!punch.try_punch(true, &mut ActionGate::default(), AnimationState::Jump));
    assert!(punch.try_punch(true, &mut ActionGate::default(), AnimationState::Idle));
    assert!(!punch.try_punch(true, &mut ActionGate::default(), AnimationState::Idle));

    for _ in 0..4 {
        punch.tick(DT);
    }
    assert!(punch.try_punch(true, &mut ActionGate::default(), AnimationState::Run));
}

// -----------------------------------------------------------------------------
// Parts
// -----------------------------------------------------------------------------

#[test]
fn test_player_part_index_drops_duplicates() {
    let ids = entities(3);
    let (index, errors) = index_player_parts([
        ("head".to_string(), ids[0]),
        ("torso".to_string(), ids[1]),
        ("head".to_string(), ids[2]),
    ]);

    assert_eq!(index.len(), 2);
    assert_eq!(index.get("head"), Some(&ids[0]));
    assert_eq!(errors, vec![PartError::DuplicatePlayerPart("head".to_string())]);
}

#[test]
fn test_ability_parts_skip_bad_entries() {
    let ids = entities(4);
    let available: HashMap<String, Entity> = [
        ("head", ids[0]),
        ("torso", ids[1]),
        ("Effect_Dash", ids[2]),
        ("fist", ids[3]),
    ]
    .into_iter()
    .map(|(name, id)| (name.to_string(), id))
    .collect();

    let def = |ability: &str, parts: &[&str]| AbilityPartsDef {
        ability: ability.to_string(),
        parts: parts.iter().map(|p| p.to_string()).collect(),
    };
    let defs = [
        def("Dash", &["Effect_Dash"]),
        def("", &["head"]),
        def("Dash", &["torso"]),
        def("Punch", &["fist", "fist", "", "wings"]),
        def("Shield", &["nope"]),
    ];

    let (parts, errors) = AbilityParts::build(&defs, &available);

    assert_eq!(parts.parts_for("Dash"), Some(&[ids[2]][..]));
    assert_eq!(parts.parts_for("Punch"), Some(&[ids[3]][..]));
    assert_eq!(parts.parts_for("Shield"), None);
    assert_eq!(
        errors,
        vec![
            PartError::EmptyAbilityName { index: 1 },
            PartError::DuplicateAbility("Dash".to_string()),
            PartError::DuplicatePart {
                ability: "Punch".to_string(),
                part: "fist".to_string(),
            },
            PartError::EmptyPartName {
                ability: "Punch".to_string(),
                index: 2,
            },
            PartError::MissingPart {
                ability: "Punch".to_string(),
                part: "wings".to_string(),
            },
            PartError::MissingPart {
                ability: "Shield".to_string(),
                part: "nope".to_string(),
            },
        ]
    );
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

#[derive(Resource, Default)]
struct PartsLog(Vec<PartsVisibility>);

fn log_parts(mut changes: MessageReader<AbilityPartsChanged>, mut log: ResMut<PartsLog>) {
    log.0.extend(changes.read().map(|change| change.visibility));
}

fn touch(app: &mut App, a: Entity, b: Entity) {
    app.world_mut().write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
}

fn step(app: &mut App) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(DT));
    app.update();
}

fn trigger_app() -> App {
    let mut app = App::new();
    app.add_message::<CollisionStart>()
        .add_message::<AbilityChanged>()
        .add_message::<AbilityPartsChanged>()
        .add_systems(
            Update,
            (unlock_on_trigger_contact, reconcile_triggers).chain(),
        );
    app
}

#[test]
fn test_dash_indicator_hides_on_start_and_returns_with_cooldown() {
    let mut set = default_set();
    set.dash = Dash::new(DashConfig {
        dash_time: 0.2,
        cooldown: 1.0,
        ..Default::default()
    });
    set.enable("Dash").unwrap();
    assert!(set.dash.try_start(true, &mut ActionGate::default(), AnimationState::Idle));

    let mut app = App::new();
    app.insert_resource(Time::<()>::default())
        .init_resource::<PartsLog>()
        .add_message::<AbilityPartsChanged>()
        .add_systems(
            Update,
            (tick_abilities, apply_dash_velocity, log_parts).chain(),
        );
    let player = app
        .world_mut()
        .spawn((
            set,
            LocomotionState::new(&MovementTuning::default()),
            LinearVelocity::default(),
        ))
        .id();

    // Dash runs for 4 steps, the cooldown for 16.
    for _ in 0..4 {
        step(&mut app);
    }
    assert_eq!(app.world().resource::<PartsLog>().0, vec![PartsVisibility::Hidden]);
    assert_eq!(
        app.world().get::<LinearVelocity>(player).map(|v| v.0.x),
        Some(0.0)
    );

    for _ in 4..15 {
        step(&mut app);
    }
    assert_eq!(app.world().resource::<PartsLog>().0, vec![PartsVisibility::Hidden]);

    step(&mut app);
    assert_eq!(
        app.world().resource::<PartsLog>().0,
        vec![PartsVisibility::Hidden, PartsVisibility::Shown]
    );

    for _ in 0..4 {
        step(&mut app);
    }
    assert_eq!(app.world().resource::<PartsLog>().0.len(), 2);
}

#[test]
fn test_double_touch_in_one_tick_unlocks_once() {
    let mut app = trigger_app();
    let player = app.world_mut().spawn((Player, default_set())).id();
    let trigger = app.world_mut().spawn(AbilityTrigger::new("Dash")).id();

    touch(&mut app, trigger, player);
    touch(&mut app, player, trigger);
    app.update();

    assert_eq!(app.world().resource::<Messages<AbilityChanged>>().len(), 1);
    assert!(app.world().get::<TriggerSpent>(trigger).is_some());
    assert_eq!(app.world().get::<Visibility>(trigger), Some(&Visibility::Hidden));
    let set = app.world().get::<AbilitySet>(player).unwrap();
    assert!(set.dash.has_ability());
}

#[test]
fn test_trigger_for_owned_ability_retires_itself() {
    let mut app = trigger_app();
    let mut set = default_set();
    set.enable("Shield").unwrap();
    let player = app.world_mut().spawn((Player, set)).id();
    let owned = app.world_mut().spawn(AbilityTrigger::new("Shield")).id();
    let other = app.world_mut().spawn(AbilityTrigger::new("Punch")).id();

    app.update();
    assert!(app.world().get::<TriggerSpent>(owned).is_some());
    assert!(app.world().get::<TriggerSpent>(other).is_none());
    assert_eq!(app.world().resource::<Messages<AbilityChanged>>().len(), 0);

    let mut set = app.world_mut().get_mut::<AbilitySet>(player).unwrap();
    set.restore(&[]);
    app.update();
    assert!(app.world().get::<TriggerSpent>(owned).is_none());
    assert_eq!(app.world().get::<Visibility>(owned), Some(&Visibility::Inherited));
}
