//! Abilities domain: punch. Animation only, no hitbox yet.

use serde::{Deserialize, Serialize};

use crate::actions::{ActionGate, ActionKind};
use crate::animation::AnimationState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PunchConfig {
    pub name: String,
    pub cooldown: f32,
}

impl Default for PunchConfig {
    fn default() -> Self {
        Self {
            name: "Punch".to_string(),
            cooldown: 0.4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Punch {
    config: PunchConfig,
    has_ability: bool,
    cooldown: f32,
}

impl Punch {
    pub fn new(config: PunchConfig) -> Self {
        Self {
            config,
            has_ability: false,
            cooldown: 0.0,
        }
    }

    pub fn config(&self) -> &PunchConfig {
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
    }

    pub fn tick(&mut self, dt: f32) {
        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        }
    }

    pub fn try_punch(
        &mut self,
        pressed: bool,
        gate: &mut ActionGate,
        animation: AnimationState,
    ) -> bool {
        if !pressed || !self.has_ability || self.cooldown > 0.0 {
            return false;
        }
        if !gate.is_allowed(ActionKind::Punch, animation) {
            return false;
        }
        self.cooldown = self.config.cooldown;
        true
    }
}
