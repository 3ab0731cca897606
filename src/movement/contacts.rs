//! Movement domain: per-tick ground and wall contact buckets.

use bevy::prelude::*;

/// Normals with a larger horizontal component than this are wall contacts.
pub const WALL_NORMAL_THRESHOLD: f32 = 0.1;
/// Bottom contacts steeper than this are sides, not ground.
pub const GROUND_NORMAL_MAX_X: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    pub point: Vec2,
    /// Points away from the touched surface, towards the character.
    pub normal: Vec2,
    /// Whether the touched collider is on a ground layer.
    pub ground_layer: bool,
}

/// Contacts gathered during one tick, cleared after the locomotion step.
#[derive(Component, Debug, Default, Clone)]
pub struct ContactSample {
    /// Surfaces on the character's left (normal points right).
    pub left: Vec<ContactPoint>,
    /// Surfaces on the character's right (normal points left).
    pub right: Vec<ContactPoint>,
    /// Contacts near the collider's bottom edge.
    pub bottom: Vec<ContactPoint>,
}

impl ContactSample {
    /// Sort contact points into buckets. A point can land in a wall bucket
    /// and in the bottom bucket at the same time.
    pub fn collect(
        &mut self,
        points: impl IntoIterator<Item = ContactPoint>,
        collider_bottom: f32,
        bottom_tolerance: f32,
    ) {
        for contact in points {
            if contact.normal.x > WALL_NORMAL_THRESHOLD {
                self.left.push(contact);
            } else if contact.normal.x < -WALL_NORMAL_THRESHOLD {
                self.right.push(contact);
            }

            if contact.point.y <= collider_bottom + bottom_tolerance {
                self.bottom.push(contact);
            }
        }
    }

    /// The only source of truth for "standing on something".
    pub fn touching_ground(&self) -> bool {
        self.bottom
            .iter()
            .any(|c| c.ground_layer && c.normal.x.abs() < GROUND_NORMAL_MAX_X)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty() && self.bottom.is_empty()
    }

    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
        self.bottom.clear();
    }
}
