//! Abilities domain: shield with absorption capacity.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actions::{ActionGate, ActionKind};
use crate::animation::AnimationState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShieldConfig {
    pub name: String,
    /// Damage absorbed before the shield breaks.
    pub strength: i32,
    pub duration: f32,
    pub cooldown: f32,
    /// Grace period after a non-broken turn-off that still absorbs one hit.
    pub forgiveness_time: f32,
    pub movement_factor: f32,
    pub jump_factor: f32,
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            name: "Shield".to_string(),
            strength: 1,
            duration: 1.0,
            cooldown: 5.0,
            forgiveness_time: 0.2,
            movement_factor: 0.5,
            jump_factor: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShieldOff {
    Expired,
    Toggled,
    Broken,
}

#[derive(Debug, Clone)]
pub struct Shield {
    config: ShieldConfig,
    has_ability: bool,
    on: bool,
    strength: i32,
    timer: f32,
    cooldown: f32,
    forgiveness: f32,
}

impl Shield {
    pub fn new(config: ShieldConfig) -> Self {
        let strength = config.strength;
        Self {
            config,
            has_ability: false,
            on: false,
            strength,
            timer: 0.0,
            cooldown: 0.0,
            forgiveness: 0.0,
        }
    }

    pub fn config(&self) -> &ShieldConfig {
        &self.config
    }

    pub fn has_ability(&self) -> bool {
        self.has_ability
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn strength(&self) -> i32 {
        self.strength
    }

    pub fn in_forgiveness(&self) -> bool {
        !self.on && self.forgiveness > 0.0
    }

    pub(crate) fn grant(&mut self) {
        self.has_ability = true;
        self.on = false;
        self.strength = self.config.strength;
        self.cooldown = 0.0;
        self.forgiveness = 0.0;
    }

    pub(crate) fn revoke(&mut self) {
        self.has_ability = false;
        self.on = false;
        self.forgiveness = 0.0;
    }

    /// Absorb what the shield can; returns the damage that gets through.
    pub fn hit(&mut self, damage: i32) -> i32 {
        if damage <= 0 {
            warn!("Shield hit with non-positive damage {}; ignored", damage);
            return 0;
        }
        if !self.has_ability {
            return damage;
        }

        if self.on {
            if self.strength <= 0 {
                error!("Shield is on without strength; turning it off");
                self.turn_off(ShieldOff::Broken);
                return damage;
            }
            let through = self.absorb(damage);
            if self.strength == 0 {
                self.turn_off(ShieldOff::Broken);
            }
            return through;
        }

        if self.forgiveness > 0.0 && self.strength > 0 {
            // One hit only.
            self.forgiveness = 0.0;
            return self.absorb(damage);
        }

        damage
    }

    fn absorb(&mut self, damage: i32) -> i32 {
        let before = self.strength;
        self.strength = (before - damage).max(0);
        (damage - before).max(0)
    }

    /// Per-frame timers. Returns the reason if the shield ran out.
    pub fn tick(&mut self, dt: f32) -> Option<ShieldOff> {
        if !self.has_ability {
            return None;
        }

        if self.on {
            self.timer -= dt;
            if self.timer <= 0.0 {
                self.turn_off(ShieldOff::Expired);
                return Some(ShieldOff::Expired);
            }
            return None;
        }

        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        }
        if self.forgiveness > 0.0 {
            self.forgiveness -= dt;
        }
        None
    }

    /// Toggle on a button press. Turning on is gated and cooldown bound;
    /// turning off never is. Returns the new on-state if it changed.
    pub fn toggle(
        &mut self,
        pressed: bool,
        gate: &mut ActionGate,
        animation: AnimationState,
    ) -> Option<bool> {
        if !pressed || !self.has_ability {
            return None;
        }

        if self.on {
            self.turn_off(ShieldOff::Toggled);
            return Some(false);
        }

        if self.cooldown > 0.0 || !gate.is_allowed(ActionKind::Shield, animation) {
            return None;
        }

        self.on = true;
        self.timer = self.config.duration;
        self.strength = self.config.strength;
        self.forgiveness = 0.0;
        debug!("Shield on: strength={}", self.strength);
        Some(true)
    }

    fn turn_off(&mut self, reason: ShieldOff) {
        self.on = false;
        self.cooldown = self.config.cooldown;
        self.forgiveness = match reason {
            ShieldOff::Broken => 0.0,
            ShieldOff::Expired | ShieldOff::Toggled => self.config.forgiveness_time,
        };
        debug!("Shield off: {:?}", reason);
    }
}
