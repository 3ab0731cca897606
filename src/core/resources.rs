//! Core domain: shared resources for the current level.

use bevy::prelude::*;

pub const DEFAULT_SCENE: &str = "TestLevel";

/// The scene being played; names the save directory.
#[derive(Resource, Debug, Clone)]
pub struct CurrentLevel {
    pub scene: String,
    /// Where the player starts and respawns without a checkpoint.
    pub spawn_point: Vec2,
}

impl Default for CurrentLevel {
    fn default() -> Self {
        Self {
            scene: DEFAULT_SCENE.to_string(),
            spawn_point: Vec2::new(-300.0, 0.0),
        }
    }
}

/// Camera smoothing towards the player.
#[derive(Resource, Debug, Clone)]
pub struct CameraFollow {
    /// Fraction of the remaining distance covered per second.
    pub stiffness: f32,
    pub offset: Vec2,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            stiffness: 6.0,
            offset: Vec2::new(0.0, 60.0),
        }
    }
}

impl CameraFollow {
    /// Next camera position for one frame.
    pub fn step(&self, camera: Vec2, target: Vec2, dt: f32) -> Vec2 {
        let t = (self.stiffness * dt).clamp(0.0, 1.0);
        camera.lerp(target + self.offset, t)
    }
}
