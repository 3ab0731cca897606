//! Movement domain: locomotion plugin wiring and public exports.

mod body;
mod components;
mod contacts;
mod locomotion;
mod modifiers;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use body::{Aabb, BodyState, GroundQuery};
pub use components::{
    ControllerDisabled, Facing, GameLayer, Ground, LocomotionState, Player, Wall,
};
pub use contacts::{ContactPoint, ContactSample};
pub use locomotion::{
    check_grounded, downhill_correction, fixed_step, handle_flip, handle_jump, movement_force,
    predicts_wall_hit, sample_input, spike_step, stabilize_downhill, EffectiveLimits, StepEnv,
    StepOutput,
};
pub use modifiers::SpeedModifiers;
pub use resources::{LocomotionInput, MovementTuning};

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::systems::{
    read_locomotion_input, run_locomotion, sample_contacts, sample_locomotion_input,
    tick_speed_modifiers, validate_player_wiring,
};

/// Input and timers run per frame; contacts and forces run on the fixed step
/// ahead of the physics solver.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    Input,
    Contacts,
    Step,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<LocomotionInput>()
            .configure_sets(
                FixedUpdate,
                (LocomotionSet::Contacts, LocomotionSet::Step).chain(),
            )
            .add_systems(
                Update,
                (
                    validate_player_wiring,
                    read_locomotion_input,
                    sample_locomotion_input,
                    tick_speed_modifiers,
                )
                    .chain()
                    .in_set(LocomotionSet::Input)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                sample_contacts
                    .in_set(LocomotionSet::Contacts)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                run_locomotion
                    .in_set(LocomotionSet::Step)
                    .run_if(in_state(GameState::Run)),
            );
    }
}
