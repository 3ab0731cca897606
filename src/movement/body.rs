//! Movement domain: engine-free view of a character's rigid body.

use bevy::prelude::*;

/// Axis-aligned bounds in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn shrunk(&self, skin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(skin),
            max: self.max - Vec2::splat(skin),
        }
    }

    /// Strict overlap; touching edges don't count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Snapshot of the physics body for one fixed step. The physics engine owns
/// the real body; systems copy in, step, and copy back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f32,
    pub half_extents: Vec2,
}

impl BodyState {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_extents)
    }

    /// Continuous force over one step.
    pub fn apply_force(&mut self, force: Vec2, dt: f32) {
        if self.mass > 0.0 {
            self.velocity += force / self.mass * dt;
        }
    }

    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.mass > 0.0 {
            self.velocity += impulse / self.mass;
        }
    }
}

/// Answers "would this area be inside ground geometry?"
pub trait GroundQuery {
    fn overlaps_ground(&self, area: Aabb) -> bool;
}

impl GroundQuery for [Aabb] {
    fn overlaps_ground(&self, area: Aabb) -> bool {
        self.iter().any(|solid| solid.overlaps(&area))
    }
}
