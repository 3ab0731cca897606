//! Abilities domain: dash, shield and punch behind an ability roster.

mod dash;
mod events;
mod parts;
mod punch;
mod resources;
mod roster;
mod set;
mod shield;
mod systems;
mod triggers;

#[cfg(test)]
mod tests;

pub use dash::{Dash, DashConfig, DashPhase};
pub use events::{AbilityChanged, AbilityPartsChanged};
pub use parts::{index_player_parts, AbilityParts, AbilityPartsDef, PartError, PartsVisibility};
pub use punch::{Punch, PunchConfig};
pub use resources::AbilityInput;
pub use roster::{AbilityKind, AbilityRoster, RosterChange, RosterError};
pub use set::{AbilityChange, AbilitySet};
pub use shield::{Shield, ShieldConfig, ShieldOff};
pub use systems::publish_change;
pub use triggers::{AbilityTrigger, TriggerSpent};

use bevy::prelude::*;

use crate::abilities::systems::{
    apply_dash_velocity, apply_part_visibility, apply_shield_effects, read_ability_input,
    reconcile_triggers, request_abilities, tick_abilities, unlock_on_trigger_contact,
};
use crate::core::GameState;
use crate::movement::LocomotionSet;

pub struct AbilitiesPlugin;

impl Plugin for AbilitiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AbilityInput>()
            .add_message::<AbilityPartsChanged>()
            .add_message::<AbilityChanged>()
            .add_systems(
                Update,
                (
                    read_ability_input,
                    tick_abilities,
                    request_abilities,
                    apply_shield_effects,
                )
                    .chain()
                    .after(LocomotionSet::Input)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                Update,
                (
                    unlock_on_trigger_contact,
                    reconcile_triggers,
                    apply_part_visibility,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                apply_dash_velocity
                    .after(LocomotionSet::Step)
                    .run_if(in_state(GameState::Run)),
            );
    }
}
