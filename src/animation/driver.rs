//! Animation state machine for the player.
//!
//! Gameplay systems never query clips directly: they write
//! [`AnimationParams`] and read back [`AnimationDriver::state`], which is the
//! identity the action gate keys its rules on.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Animation states of the player's base layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    Run,
    Jump,
    JumpRecovery,
    Dash,
    Shield,
    Punch,
}

/// Parameters written by gameplay systems each tick.
#[derive(Component, Debug, Default, Clone)]
pub struct AnimationParams {
    pub in_air: bool,
    pub run: bool,
    pub air_landing_ok: bool,
    pub shield: bool,
    /// One-shot, consumed by the next driver step.
    pub dash_trigger: bool,
    /// One-shot, consumed by the next driver step.
    pub punch_trigger: bool,
}

impl AnimationParams {
    pub fn trigger_dash(&mut self) {
        self.dash_trigger = true;
    }

    pub fn trigger_punch(&mut self) {
        self.punch_trigger = true;
    }
}

/// Clip lengths in seconds for the timed states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationClips {
    pub dash: f32,
    pub punch: f32,
    pub jump_recovery: f32,
}

impl Default for AnimationClips {
    fn default() -> Self {
        Self {
            dash: 0.2,
            punch: 0.3,
            jump_recovery: 0.15,
        }
    }
}

/// Transitions other domains react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationTransition {
    EnteredRecovery,
    LeftRecovery,
}

#[derive(Component, Debug)]
pub struct AnimationDriver {
    state: AnimationState,
    previous_state: AnimationState,
    clips: AnimationClips,
    clip_timer: f32,
    landing_ok: bool,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(AnimationClips::default())
    }
}

impl AnimationDriver {
    pub fn new(clips: AnimationClips) -> Self {
        Self {
            state: AnimationState::Idle,
            previous_state: AnimationState::Idle,
            clips,
            clip_timer: 0.0,
            landing_ok: false,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn previous_state(&self) -> AnimationState {
        self.previous_state
    }

    /// Advance the machine by `dt`, consuming one-shot triggers.
    pub fn step(&mut self, params: &mut AnimationParams, dt: f32) -> Option<AnimationTransition> {
        let dash = std::mem::take(&mut params.dash_trigger);
        let punch = std::mem::take(&mut params.punch_trigger);

        if self.clip_timer > 0.0 {
            self.clip_timer -= dt;
        }

        let next = if dash {
            self.clip_timer = self.clips.dash;
            AnimationState::Dash
        } else if punch {
            self.clip_timer = self.clips.punch;
            AnimationState::Punch
        } else {
            match self.state {
                AnimationState::Dash | AnimationState::Punch if self.clip_timer > 0.0 => {
                    self.state
                }
                _ => self.resolve_locomotion(params),
            }
        };

        let transition = match (
            self.state == AnimationState::JumpRecovery,
            next == AnimationState::JumpRecovery,
        ) {
            (false, true) => Some(AnimationTransition::EnteredRecovery),
            (true, false) => Some(AnimationTransition::LeftRecovery),
            _ => None,
        };

        if next != self.state {
            debug!("Animation: {:?} -> {:?}", self.state, next);
            self.previous_state = self.state;
            self.state = next;
        }

        transition
    }

    fn resolve_locomotion(&mut self, params: &AnimationParams) -> AnimationState {
        if params.shield {
            return AnimationState::Shield;
        }

        if params.in_air {
            self.landing_ok = params.air_landing_ok;
            return AnimationState::Jump;
        }

        match self.state {
            AnimationState::Jump if self.landing_ok => {
                self.landing_ok = false;
                self.clip_timer = self.clips.jump_recovery;
                AnimationState::JumpRecovery
            }
            AnimationState::JumpRecovery if self.clip_timer > 0.0 => AnimationState::JumpRecovery,
            _ if params.run => AnimationState::Run,
            _ => AnimationState::Idle,
        }
    }
}
