//! Audio domain: playback requests.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::audio::SfxKind;

#[derive(Debug)]
pub struct PlaySfx {
    pub kind: SfxKind,
}

impl Message for PlaySfx {}

#[derive(Debug)]
pub struct StopSfx {
    pub voice: Entity,
}

impl Message for StopSfx {}
