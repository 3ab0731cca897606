//! Save domain: checkpoints and JSON save files.

mod components;
mod data;
mod store;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{Checkpoint, CheckpointReached, LastCheckpoint, Saveable};
pub use data::{ObjectSnapshot, SaveGame};
pub use store::{SaveError, SaveStore, CHECKPOINT_SLOT, SAVE_DIR};

use bevy::prelude::*;

use crate::core::GameState;
use crate::save::systems::{checkpoint_contacts, reload_on_death, save_initial_checkpoint};

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SaveStore>()
            .init_resource::<LastCheckpoint>()
            .add_message::<CheckpointReached>()
            .add_systems(
                Update,
                (
                    save_initial_checkpoint,
                    checkpoint_contacts,
                    reload_on_death,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );
    }
}
