//! Combat domain: messages about the player taking hits.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug)]
pub struct PlayerHit {
    pub player: Entity,
    pub damage: i32,
}

impl Message for PlayerHit {}

#[derive(Debug)]
pub struct PlayerKilled {
    pub player: Entity,
}

impl Message for PlayerKilled {}
