//! Actions domain: per-tick arbitration between the player's actions.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::animation::AnimationState;

/// Number of frame boundaries a granted dominating action blocks the others.
pub const LATCH_FRAMES: u8 = 2;

/// Everything the player can ask to do in a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Move,
    Flip,
    Jump,
    Dash,
    Shield,
    Punch,
}

impl ActionKind {
    #[cfg(test)]
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Move,
        ActionKind::Flip,
        ActionKind::Jump,
        ActionKind::Dash,
        ActionKind::Shield,
        ActionKind::Punch,
    ];

    /// Dominating actions pre-empt each other for a whole latch window.
    pub fn is_dominating(self) -> bool {
        matches!(
            self,
            ActionKind::Jump | ActionKind::Dash | ActionKind::Shield | ActionKind::Punch
        )
    }
}

/// Which animation states permit each action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionRules {
    pub movement: Vec<AnimationState>,
    pub flip: Vec<AnimationState>,
    pub jump: Vec<AnimationState>,
    pub dash: Vec<AnimationState>,
    pub shield: Vec<AnimationState>,
    pub punch: Vec<AnimationState>,
}

impl Default for ActionRules {
    fn default() -> Self {
        use AnimationState::*;
        Self {
            movement: vec![Idle, Run, JumpRecovery, Jump, Shield],
            flip: vec![Idle, Run, JumpRecovery, Jump, Dash, Shield],
            jump: vec![Idle, Run, JumpRecovery, Shield],
            dash: vec![Idle, Run, JumpRecovery, Jump],
            shield: vec![Idle, Run, JumpRecovery, Jump],
            punch: vec![Idle, Run, JumpRecovery],
        }
    }
}

impl ActionRules {
    pub fn states_for(&self, action: ActionKind) -> &[AnimationState] {
        match action {
            ActionKind::Move => &self.movement,
            ActionKind::Flip => &self.flip,
            ActionKind::Jump => &self.jump,
            ActionKind::Dash => &self.dash,
            ActionKind::Shield => &self.shield,
            ActionKind::Punch => &self.punch,
        }
    }

    pub fn permits(&self, action: ActionKind, state: AnimationState) -> bool {
        self.states_for(action).contains(&state)
    }
}

/// Decides which action may execute this tick.
///
/// Granting a dominating action commits it: the latch stays set until
/// [`LATCH_FRAMES`] frame boundaries have passed, and every other dominating
/// request in that window is refused.
#[derive(Component, Debug, Clone)]
pub struct ActionGate {
    rules: ActionRules,
    latch_frames: u8,
}

impl Default for ActionGate {
    fn default() -> Self {
        Self::new(ActionRules::default())
    }
}

impl ActionGate {
    pub fn new(rules: ActionRules) -> Self {
        Self {
            rules,
            latch_frames: 0,
        }
    }

    /// Returns true if `action` may be performed in `state`.
    ///
    /// The caller must perform a dominating action when this returns true.
    pub fn is_allowed(&mut self, action: ActionKind, state: AnimationState) -> bool {
        if !action.is_dominating() {
            return self.rules.permits(action, state);
        }

        if self.latch_frames > 0 || !self.rules.permits(action, state) {
            return false;
        }

        self.latch_frames = LATCH_FRAMES;
        true
    }

    pub fn is_latched(&self) -> bool {
        self.latch_frames > 0
    }

    pub fn rules(&self) -> &ActionRules {
        &self.rules
    }

    /// Called once per frame boundary.
    pub fn end_frame(&mut self) {
        self.latch_frames = self.latch_frames.saturating_sub(1);
    }
}
