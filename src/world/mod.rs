//! World domain: the playable test level.

mod layout;
mod player;
mod systems;


pub use layout::{Block, BlockKind, LevelLayout};
pub use player::{PLAYER_NAME, SPRITES_NAME};

use bevy::prelude::*;

use crate::core::GameState;
use crate::world::systems::{apply_gravity, spawn_test_level};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        // OnEnter(Run) also fires when unpausing.
        app.add_systems(OnExit(GameState::Boot), (apply_gravity, spawn_test_level));
    }
}
