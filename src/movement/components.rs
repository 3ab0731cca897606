//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::MovementTuning;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms, slopes)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Sensors (triggers, checkpoints, kill zones) - should not block movement
    Sensor,
    /// Hostile projectiles
    Projectile,
}

#[derive(Component, Debug)]
pub struct Player;

/// Set on a character whose required wiring is missing; every controller
/// system skips it.
#[derive(Component, Debug)]
pub struct ControllerDisabled;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct LocomotionState {
    pub facing: Facing,
    pub grounded: bool,
    /// Seconds of ground forgiveness left after losing contact.
    pub grounded_timer: f32,
    /// Re-jump cooldown.
    pub jump_timer: f32,
    /// Window in which holding jump keeps boosting.
    pub jump_boost_timer: f32,
    /// While positive, landing from the air doesn't need a recovery animation.
    pub air_no_landing_timer: f32,
    /// Horizontal input in -1..=1.
    pub horizontal_input: f32,
    pub jump_requested: bool,
    pub jump_boost_requested: bool,
    /// Set while downhill stabilization repositions the body.
    pub stabilizing: bool,
}

impl LocomotionState {
    pub fn new(tuning: &MovementTuning) -> Self {
        Self {
            facing: Facing::Right,
            grounded: false,
            grounded_timer: tuning.ground_to_air_forgive_time,
            jump_timer: 0.0,
            jump_boost_timer: 0.0,
            air_no_landing_timer: tuning.air_no_landing_time,
            horizontal_input: 0.0,
            jump_requested: false,
            jump_boost_requested: false,
            stabilizing: false,
        }
    }
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self::new(&MovementTuning::default())
    }
}
