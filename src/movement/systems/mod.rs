//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::sample_contacts;
pub(crate) use input::read_locomotion_input;
pub(crate) use movement::{
    run_locomotion, sample_locomotion_input, tick_speed_modifiers, validate_player_wiring,
};
