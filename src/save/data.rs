//! Save domain: serialized checkpoint data.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// One saveable object as it was at the checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub name: String,
    pub position: [f32; 2],
    /// Radians around z.
    pub rotation: f32,
    pub active: bool,
    /// Enabled ability names, for objects that carry abilities.
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub health: Option<i32>,
}

impl ObjectSnapshot {
    pub fn capture(name: &str, transform: &Transform, visibility: Option<&Visibility>) -> Self {
        Self {
            name: name.to_string(),
            position: transform.translation.truncate().to_array(),
            rotation: transform.rotation.to_euler(EulerRot::ZYX).0,
            active: !matches!(visibility, Some(Visibility::Hidden)),
            abilities: Vec::new(),
            health: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    pub fn apply_to(&self, transform: &mut Transform) {
        transform.translation = self.position().extend(transform.translation.z);
        transform.rotation = Quat::from_rotation_z(self.rotation);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub scene: String,
    /// Checkpoint that produced this save.
    pub checkpoint: String,
    pub objects: Vec<ObjectSnapshot>,
}

impl SaveGame {
    pub fn find(&self, name: &str) -> Option<&ObjectSnapshot> {
        self.objects.iter().find(|object| object.name == name)
    }
}
