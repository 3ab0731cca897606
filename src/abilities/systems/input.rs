//! Abilities domain: input sampling for ability buttons.

use bevy::prelude::*;

use crate::abilities::AbilityInput;

pub(crate) fn read_ability_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<AbilityInput>,
) {
    input.dash = keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyJ);
    input.shield = keyboard.just_pressed(KeyCode::KeyE) || keyboard.just_pressed(KeyCode::KeyL);
    input.punch = keyboard.just_pressed(KeyCode::KeyF) || keyboard.just_pressed(KeyCode::KeyU);
}
