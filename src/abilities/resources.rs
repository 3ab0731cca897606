//! Abilities domain: per-frame ability input.

use bevy::prelude::*;

/// Ability buttons pressed this frame.
#[derive(Resource, Debug, Default)]
pub struct AbilityInput {
    pub dash: bool,
    pub shield: bool,
    pub punch: bool,
}
