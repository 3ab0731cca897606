//! Abilities domain: messages for ability and part changes.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::abilities::{AbilityKind, PartsVisibility};

#[derive(Debug)]
pub struct AbilityPartsChanged {
    pub entity: Entity,
    pub ability: String,
    pub visibility: PartsVisibility,
}

impl Message for AbilityPartsChanged {}

#[derive(Debug)]
pub struct AbilityChanged {
    pub entity: Entity,
    pub name: String,
    pub kind: AbilityKind,
    pub enabled: bool,
}

impl Message for AbilityChanged {}
