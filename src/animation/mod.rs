//! Animation domain: player animation state machine and visual sync.

mod driver;
mod systems;


pub use driver::{
    AnimationClips, AnimationDriver, AnimationParams, AnimationState, AnimationTransition,
};
pub use systems::{BodySprite, SpriteRoot};

use bevy::prelude::*;

use crate::animation::systems::{drive_animation, sync_facing, tint_body_sprite};
use crate::core::GameState;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (drive_animation, sync_facing, tint_body_sprite)
                .chain()
                .run_if(in_state(GameState::Run)),
        );
    }
}
