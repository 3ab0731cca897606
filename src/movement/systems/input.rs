//! Movement domain: keyboard sampling for locomotion.

use bevy::prelude::*;

use crate::movement::LocomotionInput;

pub(crate) fn read_locomotion_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<LocomotionInput>,
) {
    *input = LocomotionInput::from_keys(&keyboard);
}
