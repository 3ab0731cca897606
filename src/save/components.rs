//! Save domain: checkpoint markers and saveable objects.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Touching this saves the game, once per checkpoint in a row.
#[derive(Component, Debug, Clone)]
pub struct Checkpoint {
    pub id: String,
}

/// Included in save snapshots under a stable name.
#[derive(Component, Debug, Clone)]
pub struct Saveable {
    pub name: String,
}

impl Saveable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The checkpoint the current save came from.
#[derive(Resource, Debug, Default)]
pub struct LastCheckpoint {
    pub id: Option<String>,
}

impl LastCheckpoint {
    /// Only a different checkpoint than the last one saves again.
    pub fn accepts(&self, id: &str) -> bool {
        self.id.as_deref() != Some(id)
    }
}

#[derive(Debug)]
pub struct CheckpointReached {
    pub id: String,
}

impl Message for CheckpointReached {}
