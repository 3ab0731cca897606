//! Core domain: game states, pausing and the camera.

mod resources;
mod state;
mod systems;


pub use resources::{CameraFollow, CurrentLevel, DEFAULT_SCENE};
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{
    camera_follow_player, finish_boot, pause_physics, resume_physics, setup_camera, toggle_pause,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<CurrentLevel>()
            .init_resource::<CameraFollow>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, finish_boot.run_if(in_state(GameState::Boot)))
            .add_systems(
                Update,
                toggle_pause.run_if(in_state(GameState::Run).or(in_state(GameState::Paused))),
            )
            .add_systems(
                PostUpdate,
                camera_follow_player.run_if(in_state(GameState::Run)),
            )
            .add_systems(OnEnter(GameState::Paused), pause_physics)
            .add_systems(OnExit(GameState::Paused), resume_physics);
    }
}
