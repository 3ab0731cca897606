//! Abilities domain: unlock triggers placed in the level.

use bevy::prelude::*;

/// Sensor that enables `ability_name` on the player who touches it.
#[derive(Component, Debug, Clone)]
pub struct AbilityTrigger {
    pub ability_name: String,
}

impl AbilityTrigger {
    pub fn new(ability_name: impl Into<String>) -> Self {
        Self {
            ability_name: ability_name.into(),
        }
    }
}

/// Set on a trigger whose ability the player already owns; the trigger is
/// hidden and its collider disabled until the ability is lost again.
#[derive(Component, Debug)]
pub struct TriggerSpent;

