//! Abilities domain: system modules for ability input, timers and unlocks.

pub(crate) mod effects;
pub(crate) mod input;
pub(crate) mod unlock;

pub(crate) use effects::{
    apply_dash_velocity, apply_part_visibility, apply_shield_effects, request_abilities,
    tick_abilities,
};
pub(crate) use input::read_ability_input;
pub(crate) use unlock::{reconcile_triggers, unlock_on_trigger_contact};
pub use unlock::publish_change;
