//! Content domain: data definitions deserialized from RON.

use serde::{Deserialize, Serialize};

use crate::abilities::{AbilityPartsDef, DashConfig, PunchConfig, ShieldConfig};
use crate::actions::ActionRules;
use crate::animation::AnimationClips;
use crate::movement::MovementTuning;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilitiesDef {
    pub dash: DashConfig,
    pub shield: ShieldConfig,
    pub punch: PunchConfig,
}

impl AbilitiesDef {
    pub fn names(&self) -> [&str; 3] {
        [
            self.dash.name.as_str(),
            self.shield.name.as_str(),
            self.punch.name.as_str(),
        ]
    }
}

/// Everything tunable about the player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerDef {
    pub health: i32,
    pub movement: MovementTuning,
    pub abilities: AbilitiesDef,
    /// Sprite children shown while an ability is enabled.
    pub parts: Vec<AbilityPartsDef>,
    pub animation: AnimationClips,
    pub action_rules: ActionRules,
}

impl Default for PlayerDef {
    fn default() -> Self {
        Self {
            health: 3,
            movement: MovementTuning::default(),
            abilities: AbilitiesDef::default(),
            parts: vec![
                AbilityPartsDef {
                    ability: "Dash".to_string(),
                    parts: vec!["Effect_Dash".to_string()],
                },
                AbilityPartsDef {
                    ability: "Shield".to_string(),
                    parts: vec!["shield_bubble".to_string()],
                },
                AbilityPartsDef {
                    ability: "Punch".to_string(),
                    parts: vec!["fist".to_string()],
                },
            ],
            animation: AnimationClips::default(),
            action_rules: ActionRules::default(),
        }
    }
}
