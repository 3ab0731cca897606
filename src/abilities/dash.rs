//! Abilities domain: dash.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actions::{ActionGate, ActionKind};
use crate::animation::AnimationState;
use crate::movement::Facing;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub name: String,
    pub dash_time: f32,
    pub dash_velocity: f32,
    pub cooldown: f32,
    /// Horizontal speed left over when the dash ends, signed by facing.
    pub end_kick: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            name: "Dash".to_string(),
            dash_time: 0.2,
            dash_velocity: 900.0,
            cooldown: 5.0,
            end_kick: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashPhase {
    Idle,
    /// First fixed step of a dash; the ready indicator goes away.
    Started,
    Dashing,
    Ended,
}

#[derive(Debug, Clone)]
pub struct Dash {
    config: DashConfig,
    has_ability: bool,
    cooldown: f32,
    remaining: f32,
    dashing: bool,
    announced: bool,
}

impl Dash {
    pub fn new(config: DashConfig) -> Self {
        Self {
            config,
            has_ability: false,
            cooldown: 0.0,
            remaining: 0.0,
            dashing: false,
            announced: false,
        }
    }

    pub fn config(&self) -> &DashConfig {
        &self.config
    }

    pub fn has_ability(&self) -> bool {
        self.has_ability
    }

    pub(crate) fn grant(&mut self) {
        self.has_ability = true;
        self.cooldown = 0.0;
    }

    pub(crate) fn revoke(&mut self) {
        self.has_ability = false;
        self.dashing = false;
        self.remaining = 0.0;
    }

    /// Per-frame cooldown countdown. True on the frame the cooldown runs out,
    /// which is when the ready indicator comes back.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.cooldown <= 0.0 {
            return false;
        }
        self.cooldown -= dt;
        self.cooldown <= 0.0 && self.has_ability
    }

    /// The gate is asked last so a refused dash never latches it.
    pub fn try_start(
        &mut self,
        pressed: bool,
        gate: &mut ActionGate,
        animation: AnimationState,
    ) -> bool {
        if !pressed || !self.has_ability || self.cooldown > 0.0 || self.dashing {
            return false;
        }
        if !gate.is_allowed(ActionKind::Dash, animation) {
            return false;
        }

        self.dashing = true;
        self.announced = false;
        self.remaining = self.config.dash_time;
        self.cooldown = self.config.cooldown;
        true
    }

    /// Overrides horizontal velocity while the dash lasts.
    pub fn fixed_tick(&mut self, velocity: &mut Vec2, facing: Facing, dt: f32) -> DashPhase {
        if !self.dashing {
            return DashPhase::Idle;
        }

        self.remaining -= dt;
        if self.remaining < 0.0 {
            self.dashing = false;
            velocity.x = facing.sign() * self.config.end_kick;
            return DashPhase::Ended;
        }

        velocity.x = facing.sign() * self.config.dash_velocity;
        if self.announced {
            DashPhase::Dashing
        } else {
            self.announced = true;
            DashPhase::Started
        }
    }
}
