//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub max_speed: f32,
    /// Impulse applied once when a jump starts.
    pub jump_force: f32,
    /// Continuous force while the jump button is held in the boost window.
    pub jump_boost_force: f32,
    pub air_speed_factor: f32,
    pub landing_slowness_factor: f32,
    /// How long the player may be airborne and still count as grounded.
    pub ground_to_air_forgive_time: f32,
    /// Should be longer than `ground_to_air_forgive_time`.
    pub jump_cooldown: f32,
    pub jump_boost_time: f32,
    pub air_no_landing_time: f32,
    /// Tallest ledge the player walks over.
    pub spike_threshold: f32,
    pub spike_handling: bool,
    pub downhill_stabilization: bool,
    pub gravity: f32,
    pub mass: f32,
    pub collider_width: f32,
    pub collider_height: f32,
    /// Contacts this close to the collider's bottom edge count as ground.
    pub bottom_contact_tolerance: f32,
    /// How far past the collider the contact rays reach.
    pub contact_reach: f32,
    /// Shrinks the predicted bounds before the wall overlap test.
    pub wall_skin: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: 320.0,
            jump_force: 560.0,
            jump_boost_force: 1400.0,
            air_speed_factor: 0.7,
            landing_slowness_factor: 0.2,
            ground_to_air_forgive_time: 0.1,
            jump_cooldown: 0.11,
            jump_boost_time: 0.3,
            air_no_landing_time: 0.1,
            spike_threshold: 19.0,
            spike_handling: true,
            downhill_stabilization: true,
            gravity: 1500.0,
            mass: 1.0,
            collider_width: 24.0,
            collider_height: 48.0,
            bottom_contact_tolerance: 3.0,
            contact_reach: 2.0,
            wall_skin: 0.5,
        }
    }
}

impl MovementTuning {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.collider_width, self.collider_height) * 0.5
    }

    /// Vertical speed right after the jump impulse.
    pub fn jump_velocity(&self) -> f32 {
        self.jump_force / self.mass
    }

    /// Height of an unboosted jump: h = v² / (2g)
    pub fn single_jump_height(&self) -> f32 {
        let v = self.jump_velocity();
        v * v / (2.0 * self.gravity)
    }
}

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const JUMP_KEYS: [KeyCode; 2] = [KeyCode::Space, KeyCode::KeyK];

/// This frame's locomotion buttons. Only the horizontal axis moves the
/// character; vertical movement comes from jumping alone.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct LocomotionInput {
    /// -1, 0 or 1; opposite keys cancel out.
    pub horizontal: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
}

impl LocomotionInput {
    pub fn from_keys(keys: &ButtonInput<KeyCode>) -> Self {
        let left = keys.any_pressed(LEFT_KEYS);
        let right = keys.any_pressed(RIGHT_KEYS);
        let horizontal = match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };

        Self {
            horizontal,
            jump_pressed: keys.any_just_pressed(JUMP_KEYS),
            jump_held: keys.any_pressed(JUMP_KEYS),
        }
    }
}
